//! The L1 event processor trait.
//!
//! Concrete processors (deposits, batch sequencing, verification, ...) live
//! outside this crate and are registered with a
//! [`ProcessorRegistryBuilder`](crate::builder::ProcessorRegistryBuilder).

use async_trait::async_trait;

use crate::error::SyncError;
use crate::types::{EventOrder, EventType, ForkId, L1Block, SyncContext};

/// Business logic for one or more L1 event types on one or more forks.
///
/// `Tx` is the caller's transaction handle. The registry forwards it to
/// `process` without opening, committing or rolling it back.
#[async_trait]
pub trait L1EventProcessor<Tx: ?Sized + Send>: Send + Sync {
    /// Human-readable processor name, used in logs and conflict errors.
    fn name(&self) -> &str;

    /// Event types this processor handles.
    fn supported_events(&self) -> &[EventType];

    /// Forks this processor handles. May contain [`ForkId::WILDCARD`].
    fn supported_fork_ids(&self) -> &[ForkId];

    /// Process one event.
    async fn process(
        &self,
        ctx: &SyncContext,
        order: &EventOrder,
        block: Option<&L1Block>,
        tx: Option<&mut Tx>,
    ) -> Result<(), SyncError>;
}

/// Name and support declarations shared by most processors.
///
/// Processors embed one and delegate the three declaration methods to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorBase {
    name: String,
    supported_events: Vec<EventType>,
    supported_fork_ids: Vec<ForkId>,
}

impl ProcessorBase {
    pub fn new(
        name: impl Into<String>,
        supported_events: impl IntoIterator<Item = EventType>,
        supported_fork_ids: impl IntoIterator<Item = ForkId>,
    ) -> Self {
        Self {
            name: name.into(),
            supported_events: supported_events.into_iter().collect(),
            supported_fork_ids: supported_fork_ids.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supported_events(&self) -> &[EventType] {
        &self.supported_events
    }

    pub fn supported_fork_ids(&self) -> &[ForkId] {
        &self.supported_fork_ids
    }
}
