//! l1sync-core — fork-aware routing of L1 synchronizer events to their processors.
//!
//! # Architecture
//!
//! ```text
//! L1EventProcessor × N → ProcessorRegistryBuilder::register
//!                              │
//!                              ▼ build()
//!                       ProcessorRegistry   (immutable, shared via Arc)
//!                              ├── get(fork, event)       concrete → wildcard → none
//!                              └── process(ctx, fork, order, block, tx)
//! ```
//!
//! Block fetching, reorg handling, transaction lifecycle and the processors
//! themselves belong to the synchronizer; this crate only resolves which
//! processor applies and forwards the call.

pub mod builder;
pub mod config;
pub mod error;
pub mod processor;
pub mod registry;
pub mod telemetry;
pub mod types;

pub use builder::ProcessorRegistryBuilder;
pub use config::{DispatchConfig, DuplicatePolicy};
pub use error::{RegistryError, SyncError, UnsupportedEventError};
pub use processor::{L1EventProcessor, ProcessorBase};
pub use registry::ProcessorRegistry;
pub use telemetry::{init_tracing, LogConfig};
pub use types::{EventOrder, EventType, ForkId, L1Block, SyncContext, SyncPhase, FORKS_ALL};
