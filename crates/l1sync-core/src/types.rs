//! Shared types for fork-aware event dispatch.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── ForkId ───────────────────────────────────────────────────────────────────

/// Protocol fork identifier.
///
/// `ForkId::WILDCARD` is a reserved sentinel: processors registered under it
/// apply to every fork that has no concrete registration of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForkId(pub u64);

impl ForkId {
    /// Matches any fork during resolution. Never a concrete fork.
    pub const WILDCARD: ForkId = ForkId(0);

    /// Returns `true` if this is the wildcard sentinel.
    pub fn is_wildcard(&self) -> bool {
        *self == Self::WILDCARD
    }
}

impl From<u64> for ForkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ForkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            write!(f, "*")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Fork set for processors that handle an event the same way on every fork.
pub const FORKS_ALL: &[ForkId] = &[ForkId::WILDCARD];

// ─── EventType ────────────────────────────────────────────────────────────────

/// Class of an L1 event (e.g. `"SequenceBatches"`). Compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(Cow<'static, str>);

impl EventType {
    pub const GLOBAL_EXIT_ROOTS: EventType = EventType::from_static("GlobalExitRoots");
    pub const L1_INFO_TREE: EventType = EventType::from_static("L1InfoTreeOrder");
    pub const SEQUENCE_BATCHES: EventType = EventType::from_static("SequenceBatches");
    pub const FORCED_BATCHES: EventType = EventType::from_static("ForcedBatches");
    pub const TRUSTED_VERIFY_BATCH: EventType = EventType::from_static("TrustedVerifyBatch");
    pub const VERIFY_BATCH: EventType = EventType::from_static("VerifyBatch");
    pub const SEQUENCE_FORCE_BATCHES: EventType = EventType::from_static("SequenceForceBatches");
    pub const FORK_IDS: EventType = EventType::from_static("forkIDs");
    pub const INITIAL_SEQUENCE_BATCHES: EventType =
        EventType::from_static("InitialSequenceBatches");
    pub const UPDATE_ETROG_SEQUENCE: EventType = EventType::from_static("UpdateEtrogSequence");

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for EventType {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── EventOrder ───────────────────────────────────────────────────────────────

/// A realized event: its type plus its ordinal position inside the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOrder {
    pub event: EventType,
    /// Index into the block's per-type event list.
    pub pos: usize,
}

impl EventOrder {
    pub fn new(event: impl Into<EventType>, pos: usize) -> Self {
        Self {
            event: event.into(),
            pos,
        }
    }
}

// ─── L1Block ──────────────────────────────────────────────────────────────────

/// The L1 block an event was observed in. Passed to processors untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1Block {
    /// Block number.
    pub number: u64,
    /// Block hash (`0x…`).
    pub hash: String,
    /// Parent block hash (`0x…`).
    pub parent_hash: String,
    /// When the synchronizer received the block.
    pub received_at: DateTime<Utc>,
}

// ─── SyncContext ──────────────────────────────────────────────────────────────

/// Caller context forwarded to processors unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncContext {
    /// Chain slug of the L1 being synchronized (e.g. `"ethereum"`).
    pub chain: String,
    pub phase: SyncPhase,
}

impl SyncContext {
    pub fn new(chain: impl Into<String>, phase: SyncPhase) -> Self {
        Self {
            chain: chain.into(),
            phase,
        }
    }
}

/// Whether the synchronizer is replaying history or following the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncPhase {
    Backfill,
    Live,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backfill => write!(f, "backfill"),
            Self::Live => write!(f, "live"),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
