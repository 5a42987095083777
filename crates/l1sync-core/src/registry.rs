//! Immutable fork-aware registry of L1 event processors.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::{SyncError, UnsupportedEventError};
use crate::processor::L1EventProcessor;
use crate::types::{EventOrder, EventType, ForkId, L1Block, SyncContext};

/// event → fork (including `ForkId::WILDCARD`) → processor
pub(crate) type ProcessorMap<Tx> =
    HashMap<EventType, HashMap<ForkId, Arc<dyn L1EventProcessor<Tx>>>>;

/// Resolves the processor for a (fork, event) pair and dispatches to it.
///
/// Built once by [`ProcessorRegistryBuilder`](crate::builder::ProcessorRegistryBuilder)
/// and read-only afterwards, so it can be shared behind an `Arc` by any number
/// of tasks without locking.
pub struct ProcessorRegistry<Tx: ?Sized + Send + 'static> {
    processors: ProcessorMap<Tx>,
}

impl<Tx: ?Sized + Send + 'static> ProcessorRegistry<Tx> {
    pub(crate) fn from_map(processors: ProcessorMap<Tx>) -> Self {
        Self { processors }
    }

    /// Processor for `event` on `fork_id`.
    ///
    /// A concrete registration for the fork always wins; otherwise the
    /// wildcard registration for the event is used, if any.
    pub fn get(
        &self,
        fork_id: ForkId,
        event: &EventType,
    ) -> Option<&Arc<dyn L1EventProcessor<Tx>>> {
        let by_fork = self.processors.get(event)?;
        by_fork
            .get(&fork_id)
            .or_else(|| by_fork.get(&ForkId::WILDCARD))
    }

    /// Resolve the processor for `order` and run it.
    ///
    /// Returns [`SyncError::UnsupportedEvent`] when nothing is registered;
    /// otherwise returns whatever the processor returns.
    pub async fn process(
        &self,
        ctx: &SyncContext,
        fork_id: ForkId,
        order: &EventOrder,
        block: Option<&L1Block>,
        tx: Option<&mut Tx>,
    ) -> Result<(), SyncError> {
        let Some(processor) = self.get(fork_id, &order.event) else {
            return Err(SyncError::UnsupportedEvent(UnsupportedEventError::new(
                order.event.clone(),
                fork_id,
                block.map(|b| b.number),
            )));
        };

        trace!(
            processor = processor.name(),
            event = %order.event,
            pos = order.pos,
            fork = %fork_id,
            "Dispatching L1 event"
        );
        processor.process(ctx, order, block, tx).await
    }

    /// Number of (fork, event) entries, wildcard entries included.
    pub fn len(&self) -> usize {
        self.processors.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All event types with at least one registration, sorted.
    pub fn registered_events(&self) -> Vec<&EventType> {
        let mut events: Vec<&EventType> = self.processors.keys().collect();
        events.sort();
        events
    }

    /// Names of all registered processors, sorted and deduplicated.
    pub fn processor_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .processors
            .values()
            .flat_map(|by_fork| by_fork.values().map(|p| p.name()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Forks with an explicit registration for `event`, sorted. The wildcard
    /// sorts first when present.
    pub fn forks_for(&self, event: &EventType) -> Vec<ForkId> {
        let mut forks: Vec<ForkId> = self
            .processors
            .get(event)
            .map(|by_fork| by_fork.keys().copied().collect())
            .unwrap_or_default();
        forks.sort_unstable();
        forks
    }
}

impl<Tx: ?Sized + Send + 'static> fmt::Debug for ProcessorRegistry<Tx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for event in self.registered_events() {
            for fork_id in self.forks_for(event) {
                if let Some(p) = self.processors.get(event).and_then(|m| m.get(&fork_id)) {
                    map.entry(&format_args!("({fork_id}, {event})"), &p.name());
                }
            }
        }
        map.finish()
    }
}
