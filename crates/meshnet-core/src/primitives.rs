//! # Tuning Constants
//!
//! Hardcoded runtime constants for the Meshnet engine.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! None of them affect observable results, only allocation behavior.

/// Initial bucket count for a [`HashIndex`](crate::index::HashIndex).
///
/// Small registries (the host table, per-host link tables) start here and
/// double on demand.
pub const INITIAL_INDEX_CAPACITY: usize = 11;

/// Bucket count for the per-search label maps used by the router.
///
/// Sized so that a single routing query over realistic topologies never
/// rehashes mid-search. Rehashing there is correctness-neutral but costs a
/// full reinsertion at the worst possible moment.
pub const ROUTE_INDEX_CAPACITY: usize = 262_144;

/// Initial slot count for an [`IndexedHeap`](crate::heap::IndexedHeap).
pub const INITIAL_HEAP_CAPACITY: usize = 1024;

/// Initial entry count for the connectivity analyzer's reusable BFS queue.
///
/// The queue grows to the largest traversal seen and never shrinks.
pub const INITIAL_SCAN_QUEUE_CAPACITY: usize = 1024;

/// Separator used when joining host identifiers into a path ordering key.
///
/// `'!'` sorts before every character the console accepts in an identifier
/// (uppercase letters, digits, underscore), so comparing joined keys as
/// strings is equivalent to element-wise sequence comparison.
pub const PATH_KEY_SEPARATOR: char = '!';
