//! # Core Type Definitions
//!
//! This module contains the data model for the Meshnet topology engine:
//! - Arena identifiers (`HostIdx`, `EdgeIdx`)
//! - Graph entities (`Host`, `Backdoor`) and the canonical pair key
//! - Structured query results (`Route`, `BreachImpact`)
//! - Error types (`MeshError`, `ErrorKind`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Use saturating arithmetic for accumulators to prevent overflow
//! - Carry no interior mutability; every mutation goes through `&mut`

use crate::index::HashIndex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ARENA IDENTIFIERS
// =============================================================================

/// Stable index of a host in the network's host arena.
///
/// Hosts are never removed, so the index is valid for the lifetime of the
/// network and doubles as the key for epoch-stamped visited sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HostIdx(pub usize);

/// Stable index of a backdoor in the network's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeIdx(pub usize);

// =============================================================================
// HOST
// =============================================================================

/// A host (access point) in the network.
///
/// Stores identity, clearance level, and the incident backdoors, both as an
/// insertion-ordered list for iteration and as a keyed table for O(1)
/// duplicate checks by canonical pair key.
#[derive(Debug)]
pub struct Host {
    id: String,
    clearance: i64,
    links: Vec<EdgeIdx>,
    link_index: HashIndex<EdgeIdx>,
}

impl Host {
    #[must_use]
    pub fn new(id: impl Into<String>, clearance: i64) -> Self {
        Self {
            id: id.into(),
            clearance,
            links: Vec::new(),
            link_index: HashIndex::new(),
        }
    }

    /// The unique string identifier of this host.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Clearance level used as the traversal predicate against firewalls.
    #[must_use]
    pub const fn clearance(&self) -> i64 {
        self.clearance
    }

    /// Incident backdoors in insertion order.
    #[must_use]
    pub fn links(&self) -> &[EdgeIdx] {
        &self.links
    }

    /// Look up an incident backdoor by its canonical pair key.
    #[must_use]
    pub fn find_link(&self, pair_key: &str) -> Option<EdgeIdx> {
        self.link_index.find(pair_key).copied()
    }

    /// Record a new incident backdoor under its canonical pair key.
    pub fn attach(&mut self, pair_key: &str, edge: EdgeIdx) {
        self.link_index.insert(pair_key, edge);
        self.links.push(edge);
    }
}

// =============================================================================
// BACKDOOR
// =============================================================================

/// An undirected, sealable link between two distinct hosts.
///
/// Latency, bandwidth, and firewall level are fixed at creation; only the
/// sealed flag mutates. A sealed backdoor is excluded from traversal and
/// connectivity analysis without being deleted.
#[derive(Debug)]
pub struct Backdoor {
    key: String,
    host1: HostIdx,
    host2: HostIdx,
    latency: i64,
    bandwidth: i64,
    firewall: i64,
    sealed: bool,
}

impl Backdoor {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        host1: HostIdx,
        host2: HostIdx,
        latency: i64,
        bandwidth: i64,
        firewall: i64,
    ) -> Self {
        Self {
            key: key.into(),
            host1,
            host2,
            latency,
            bandwidth,
            firewall,
            sealed: false,
        }
    }

    /// Canonical pair key (larger endpoint id first).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn host1(&self) -> HostIdx {
        self.host1
    }

    #[must_use]
    pub const fn host2(&self) -> HostIdx {
        self.host2
    }

    /// The endpoint opposite to `host`.
    ///
    /// `host` must be one of the two endpoints.
    #[must_use]
    pub const fn other_end(&self, host: HostIdx) -> HostIdx {
        if self.host1.0 == host.0 {
            self.host2
        } else {
            self.host1
        }
    }

    #[must_use]
    pub const fn latency(&self) -> i64 {
        self.latency
    }

    #[must_use]
    pub const fn bandwidth(&self) -> i64 {
        self.bandwidth
    }

    #[must_use]
    pub const fn firewall(&self) -> i64 {
        self.firewall
    }

    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Flip the sealed flag. Returns the new state.
    pub fn toggle_seal(&mut self) -> bool {
        self.sealed = !self.sealed;
        self.sealed
    }
}

/// Derive the canonical, order-independent key for an unordered host pair.
///
/// The lexicographically larger identifier comes first, so lookup from
/// either endpoint yields the same key.
#[must_use]
pub fn pair_key(id1: &str, id2: &str) -> String {
    if id1 > id2 {
        format!("{id1}{id2}")
    } else {
        format!("{id2}{id1}")
    }
}

// =============================================================================
// QUERY RESULTS
// =============================================================================

/// The result of a successful routing query: the visited host identifiers
/// from source to destination (inclusive) and the total accumulated cost.
///
/// Produced fresh per query; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Total dynamic latency summed over all hops.
    pub total_latency: i64,
    /// Host identifiers in traversal order, source first.
    pub hosts: Vec<String>,
}

impl Route {
    /// Number of hops (edges) in the route.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.hosts.len().saturating_sub(1)
    }
}

/// The result of simulating the removal of a single host or backdoor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachImpact {
    /// True when the removal strictly increases the component count, i.e.
    /// the element is an articulation point (host) or a bridge (backdoor).
    pub critical: bool,
    /// Component count of the hypothetical topology.
    pub components: usize,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Coarse failure taxonomy.
///
/// Presentation layers may branch on this; the fine-grained reason lives in
/// [`MeshError::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A referenced host or backdoor does not exist.
    NotFound,
    /// The mutation collides with an existing host or backdoor.
    Conflict,
    /// An argument fails validation before any state change.
    InvalidArgument,
}

/// Errors reported by the Meshnet engine.
///
/// Every failure is reported through `Result`; no operation aborts the
/// process and no operation mutates state before validation completes.
/// A routing query with no satisfying path is NOT an error (`Ok(None)`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// The referenced host does not exist.
    #[error("host not found: {0}")]
    HostNotFound(String),

    /// No backdoor exists between the two hosts.
    #[error("no backdoor between {0} and {1}")]
    BackdoorNotFound(String, String),

    /// A host with this identifier already exists.
    #[error("host already exists: {0}")]
    HostExists(String),

    /// A backdoor already exists between the two hosts.
    #[error("backdoor already exists between {0} and {1}")]
    BackdoorExists(String, String),

    /// Both endpoints refer to the same host.
    #[error("endpoints are the same host: {0}")]
    SameHost(String),

    /// Latency must be strictly positive.
    #[error("invalid latency: {0}")]
    InvalidLatency(i64),

    /// Bandwidth must be strictly positive.
    #[error("invalid bandwidth: {0}")]
    InvalidBandwidth(i64),

    /// Firewall level must be non-negative.
    #[error("invalid firewall level: {0}")]
    InvalidFirewall(i64),

    /// The targeted backdoor is sealed and cannot be analyzed.
    #[error("backdoor between {0} and {1} is sealed")]
    BackdoorSealed(String, String),
}

impl MeshError {
    /// Machine-readable reason code for the console layer and logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::HostNotFound(_) => "HOST_NOT_FOUND",
            Self::BackdoorNotFound(_, _) => "NO_BACKDOOR",
            Self::HostExists(_) => "HOST_ALREADY_EXISTS",
            Self::BackdoorExists(_, _) => "HOST_HAS_BACKDOOR",
            Self::SameHost(_) => "HOSTS_ARE_THE_SAME",
            Self::InvalidLatency(_) => "INVALID_LATENCY",
            Self::InvalidBandwidth(_) => "INVALID_BANDWIDTH",
            Self::InvalidFirewall(_) => "INVALID_FIREWALL_LEVEL",
            Self::BackdoorSealed(_, _) => "BACKDOOR_IS_SEALED",
        }
    }

    /// Coarse taxonomy bucket for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::HostNotFound(_) | Self::BackdoorNotFound(_, _) => ErrorKind::NotFound,
            Self::HostExists(_) | Self::BackdoorExists(_, _) => ErrorKind::Conflict,
            Self::SameHost(_)
            | Self::InvalidLatency(_)
            | Self::InvalidBandwidth(_)
            | Self::InvalidFirewall(_)
            | Self::BackdoorSealed(_, _) => ErrorKind::InvalidArgument,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
