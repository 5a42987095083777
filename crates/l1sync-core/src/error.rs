//! Error types for event dispatch and registry construction.

use thiserror::Error;

use crate::types::{EventType, ForkId};

/// Errors returned while processing an L1 event.
///
/// `UnsupportedEvent` is the only variant the registry itself produces, and
/// only the registry can build its payload. Every other variant comes from a
/// processor and is returned to the caller as-is.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    UnsupportedEvent(UnsupportedEventError),

    #[error("Processor error in '{processor}': {reason}")]
    Processor { processor: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl SyncError {
    /// Returns `true` if no processor was registered for the event.
    pub fn is_unsupported_event(&self) -> bool {
        matches!(self, Self::UnsupportedEvent(_))
    }
}

/// No processor resolved for an event on a fork.
///
/// Fields are private so processors cannot forge a registry miss:
///
/// ```compile_fail
/// use l1sync_core::error::UnsupportedEventError;
/// use l1sync_core::{EventType, ForkId};
///
/// let _ = UnsupportedEventError::new(EventType::VERIFY_BATCH, ForkId(1), None);
/// ```
#[derive(Debug, Error)]
#[error(
    "no processor for event {event} on fork {fork_id}{}",
    .block_number.map(|n| format!(" (block {n})")).unwrap_or_default()
)]
pub struct UnsupportedEventError {
    event: EventType,
    fork_id: ForkId,
    block_number: Option<u64>,
}

impl UnsupportedEventError {
    pub(crate) fn new(event: EventType, fork_id: ForkId, block_number: Option<u64>) -> Self {
        Self {
            event,
            fork_id,
            block_number,
        }
    }

    pub fn event(&self) -> &EventType {
        &self.event
    }

    pub fn fork_id(&self) -> ForkId {
        self.fork_id
    }

    /// Block the event came from, when the caller supplied one.
    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }
}

/// Errors raised while building the registry or loading its configuration.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("fork {fork_id} event {event} claimed by both '{existing}' and '{incoming}'")]
    DuplicateProcessor {
        fork_id: ForkId,
        event: EventType,
        existing: String,
        incoming: String,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}
