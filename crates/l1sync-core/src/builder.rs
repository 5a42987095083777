//! Builder that compiles processor declarations into a [`ProcessorRegistry`].
//!
//! # Example
//!
//! ```rust,ignore
//! let mut builder = ProcessorRegistryBuilder::new();
//! builder.register(Arc::new(GlobalExitRootsProcessor::new(state.clone())));
//! builder.register(Arc::new(SequenceBatchesEtrog::new(state.clone())));
//! let registry = builder.build()?;
//! ```

use std::collections::hash_map::Entry;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{DispatchConfig, DuplicatePolicy};
use crate::error::RegistryError;
use crate::processor::L1EventProcessor;
use crate::registry::{ProcessorMap, ProcessorRegistry};
use crate::types::{EventType, ForkId};

/// Accumulates processor registrations. Single-threaded, consumed by [`build`](Self::build).
pub struct ProcessorRegistryBuilder<Tx: ?Sized + Send + 'static> {
    processors: ProcessorMap<Tx>,
    policy: DuplicatePolicy,
    /// First conflict seen under `DuplicatePolicy::Reject`, reported by `build()`.
    conflict: Option<RegistryError>,
}

impl<Tx: ?Sized + Send + 'static> ProcessorRegistryBuilder<Tx> {
    pub fn new() -> Self {
        Self {
            processors: ProcessorMap::new(),
            policy: DuplicatePolicy::default(),
            conflict: None,
        }
    }

    /// Create a builder honouring `config.duplicate_policy`.
    pub fn with_config(config: &DispatchConfig) -> Self {
        Self::new().duplicate_policy(config.duplicate_policy)
    }

    /// Set how conflicting registrations are resolved.
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register `processor` for every (fork, event) pair in
    /// `supported_fork_ids × supported_events`.
    pub fn register(&mut self, processor: Arc<dyn L1EventProcessor<Tx>>) {
        let events = processor.supported_events();
        let forks = processor.supported_fork_ids();
        if events.is_empty() || forks.is_empty() {
            warn!(
                processor = processor.name(),
                events = events.len(),
                forks = forks.len(),
                "Processor declares no (fork, event) pairs, nothing registered"
            );
            return;
        }

        for event in events {
            for &fork_id in forks {
                self.insert(fork_id, event, &processor);
            }
        }
    }

    fn insert(
        &mut self,
        fork_id: ForkId,
        event: &EventType,
        processor: &Arc<dyn L1EventProcessor<Tx>>,
    ) {
        let by_fork = self.processors.entry(event.clone()).or_default();
        match by_fork.entry(fork_id) {
            Entry::Vacant(slot) => {
                debug!(
                    processor = processor.name(),
                    event = %event,
                    fork = %fork_id,
                    "Registered L1 event processor"
                );
                slot.insert(Arc::clone(processor));
            }
            // Same instance declared twice (or registered twice): nothing to resolve.
            Entry::Occupied(slot) if Arc::ptr_eq(slot.get(), processor) => {}
            Entry::Occupied(mut slot) => match self.policy {
                DuplicatePolicy::Reject => {
                    if self.conflict.is_none() {
                        self.conflict = Some(RegistryError::DuplicateProcessor {
                            fork_id,
                            event: event.clone(),
                            existing: slot.get().name().to_string(),
                            incoming: processor.name().to_string(),
                        });
                    }
                }
                DuplicatePolicy::LastWins => {
                    warn!(
                        event = %event,
                        fork = %fork_id,
                        replaced = slot.get().name(),
                        processor = processor.name(),
                        "Overriding L1 event processor"
                    );
                    slot.insert(Arc::clone(processor));
                }
            },
        }
    }

    /// Freeze the registrations into an immutable registry.
    pub fn build(self) -> Result<ProcessorRegistry<Tx>, RegistryError> {
        if let Some(conflict) = self.conflict {
            return Err(conflict);
        }

        let registry = ProcessorRegistry::from_map(self.processors);
        info!(
            entries = registry.len(),
            events = registry.registered_events().len(),
            processors = registry.processor_names().len(),
            "Built L1 event processor registry"
        );
        Ok(registry)
    }
}

impl<Tx: ?Sized + Send + 'static> Default for ProcessorRegistryBuilder<Tx> {
    fn default() -> Self {
        Self::new()
    }
}
