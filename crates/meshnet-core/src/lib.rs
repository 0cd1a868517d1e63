//! # meshnet-core
//!
//! The deterministic topology engine for Meshnet - THE ENGINE.
//!
//! This crate models a mutable graph of network hosts and backdoor links
//! and answers four classes of query: constrained shortest-path routing
//! with an optional per-hop congestion penalty, global connectivity
//! (component count, cycle detection), single-element failure impact
//! (articulation points, bridges), and aggregate reporting.
//!
//! ## Architectural Constraints
//!
//! - The engine is the ONLY place where topology state exists
//! - Single-threaded, synchronous: every operation completes (including
//!   rehashes, heap growth, and cache rebuilds) before the next is accepted
//! - Integer arithmetic only; the one-decimal averages travel as tenths
//! - Structured results only; the console layer renders text
//! - No async, no I/O, no network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod connectivity;
pub mod engine;
pub mod heap;
pub mod index;
pub mod network;
pub mod primitives;
pub mod report;
pub mod router;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Backdoor, BreachImpact, EdgeIdx, ErrorKind, Host, HostIdx, MeshError, Route, pair_key,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use connectivity::{ConnectivityAnalyzer, ConnectivitySnapshot};
pub use engine::Engine;
pub use heap::{IndexedHeap, SlotStore};
pub use index::HashIndex;
pub use network::Network;
pub use report::{NetworkReport, format_tenths, ratio_tenths_half_up};
pub use router::find_route;
