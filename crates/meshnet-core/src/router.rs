//! # Router
//!
//! Multi-objective shortest-path search over the network, constrained by
//! bandwidth and clearance, with an optional congestion term that makes
//! edge cost depend on hop count.
//!
//! Candidate ordering is (1) smaller total dynamic latency, (2) fewer hops,
//! (3) lexicographically smaller host sequence. Two regimes:
//!
//! - `congestion_factor == 0`: edge costs are static, so a classic Dijkstra
//!   with one best label per host suffices. Improved labels actively evict
//!   their stale predecessor from the open set by slot.
//! - `congestion_factor != 0`: the cost of the i-th hop is
//!   `latency + λ·(i-1)`, so several non-dominated labels per host may
//!   coexist. Each host keeps a Pareto frontier over (cost, hops); a
//!   running best-destination label bounds the search.

use crate::heap::{IndexedHeap, SlotStore};
use crate::index::HashIndex;
use crate::network::Network;
use crate::primitives::{PATH_KEY_SEPARATOR, ROUTE_INDEX_CAPACITY};
use crate::types::{EdgeIdx, HostIdx, Route};
use std::cmp::Ordering;

// =============================================================================
// SEARCH LABELS
// =============================================================================

/// Handle into the per-query label arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LabelId(usize);

/// A node in the search: host reached, accumulated cost, hop count, and the
/// predecessor label. Transient; the arena is dropped with the query.
#[derive(Debug)]
struct PathLabel {
    host: HostIdx,
    total_latency: i64,
    hops: i64,
    parent: Option<LabelId>,
    /// Host sequence joined by [`PATH_KEY_SEPARATOR`]; string comparison on
    /// this key is element-wise sequence comparison.
    path_key: String,
    slot: usize,
}

#[derive(Debug, Default)]
struct LabelArena {
    labels: Vec<PathLabel>,
}

impl LabelArena {
    fn push(
        &mut self,
        host: HostIdx,
        total_latency: i64,
        hops: i64,
        parent: Option<LabelId>,
        host_id: &str,
    ) -> LabelId {
        let path_key = match parent {
            None => host_id.to_owned(),
            Some(above) => {
                let prefix = &self.labels[above.0].path_key;
                let mut key = String::with_capacity(prefix.len() + host_id.len() + 1);
                key.push_str(prefix);
                key.push(PATH_KEY_SEPARATOR);
                key.push_str(host_id);
                key
            }
        };

        let id = LabelId(self.labels.len());
        self.labels.push(PathLabel {
            host,
            total_latency,
            hops,
            parent,
            path_key,
            slot: 0,
        });
        id
    }

    fn get(&self, id: LabelId) -> &PathLabel {
        &self.labels[id.0]
    }

    /// The exact candidate ordering: cost, then hops, then path sequence.
    fn ranking(&self, a: LabelId, b: LabelId) -> Ordering {
        let left = self.get(a);
        let right = self.get(b);
        left.total_latency
            .cmp(&right.total_latency)
            .then_with(|| left.hops.cmp(&right.hops))
            .then_with(|| left.path_key.cmp(&right.path_key))
    }

    /// Weak dominance over (cost, hops); the path key breaks exact ties, so
    /// of two equal labels the lexicographically smaller one survives.
    fn dominates(&self, a: LabelId, b: LabelId) -> bool {
        let left = self.get(a);
        let right = self.get(b);

        if left.total_latency > right.total_latency {
            return false;
        }
        if left.hops > right.hops {
            return false;
        }
        if left.total_latency < right.total_latency {
            return true;
        }
        if left.hops < right.hops {
            return true;
        }
        left.path_key <= right.path_key
    }
}

impl SlotStore for LabelArena {
    type Id = LabelId;

    fn slot(&self, id: LabelId) -> usize {
        self.labels[id.0].slot
    }

    fn set_slot(&mut self, id: LabelId, slot: usize) {
        self.labels[id.0].slot = slot;
    }

    fn tie_key(&self, id: LabelId) -> &str {
        &self.labels[id.0].path_key
    }
}

// =============================================================================
// PUBLIC SEARCH ENTRY POINT
// =============================================================================

/// Find the optimal route from `origin` to `destination`.
///
/// Returns `None` when no path satisfies the constraints; an
/// origin-equals-destination query short-circuits to a zero-cost
/// single-host route without searching.
#[must_use]
pub fn find_route(
    net: &Network,
    origin: HostIdx,
    destination: HostIdx,
    min_bandwidth: i64,
    congestion_factor: i64,
) -> Option<Route> {
    if origin == destination {
        return Some(Route {
            total_latency: 0,
            hosts: vec![net.host(origin).id().to_owned()],
        });
    }

    if congestion_factor == 0 {
        shortest_static(net, origin, destination, min_bandwidth)
    } else {
        shortest_congested(net, origin, destination, min_bandwidth, congestion_factor)
    }
}

/// Per-edge traversal predicate: unsealed, enough bandwidth, and the
/// clearance of the host being EXITED meets the firewall level.
fn traversable(net: &Network, from: HostIdx, edge: EdgeIdx, min_bandwidth: i64) -> bool {
    let bd = net.backdoor(edge);
    !bd.is_sealed()
        && bd.bandwidth() >= min_bandwidth
        && net.host(from).clearance() >= bd.firewall()
}

fn build_route(net: &Network, arena: &LabelArena, label: LabelId) -> Route {
    let mut hosts = Vec::new();
    let mut cursor = Some(label);
    while let Some(id) = cursor {
        hosts.push(net.host(arena.get(id).host).id().to_owned());
        cursor = arena.get(id).parent;
    }
    hosts.reverse();

    Route {
        total_latency: arena.get(label).total_latency,
        hosts,
    }
}

// =============================================================================
// λ = 0: SINGLE-LABEL DIJKSTRA
// =============================================================================

fn shortest_static(
    net: &Network,
    origin: HostIdx,
    destination: HostIdx,
    min_bandwidth: i64,
) -> Option<Route> {
    let mut arena = LabelArena::default();
    let mut open: IndexedHeap<LabelArena, 2> = IndexedHeap::new(false);
    let mut best_by_host: HashIndex<LabelId> = HashIndex::with_capacity(ROUTE_INDEX_CAPACITY);

    let start = arena.push(origin, 0, 0, None, net.host(origin).id());
    best_by_host.insert(net.host(origin).id(), start);
    open.insert(&mut arena, [0, 0], start);

    while let Some(state) = open.extract(&mut arena) {
        let current = arena.get(state).host;

        // An extracted label that is no longer its host's recorded best is
        // stale; discard it.
        if let Some(&best) = best_by_host.find(net.host(current).id()) {
            if best != state && arena.ranking(best, state) != Ordering::Greater {
                continue;
            }
        }

        if current == destination {
            return Some(build_route(net, &arena, state));
        }

        for &edge in net.host(current).links() {
            if !traversable(net, current, edge, min_bandwidth) {
                continue;
            }

            let bd = net.backdoor(edge);
            let next = bd.other_end(current);
            let total = arena.get(state).total_latency.saturating_add(bd.latency());
            let hops = arena.get(state).hops + 1;

            let candidate = arena.push(next, total, hops, Some(state), net.host(next).id());
            let previous = best_by_host.find(net.host(next).id()).copied();

            let improved = match previous {
                None => true,
                Some(prev) => arena.ranking(candidate, prev) == Ordering::Less,
            };
            if !improved {
                continue;
            }

            // Retract the superseded label before it can be extracted.
            if let Some(prev) = previous {
                let slot = arena.get(prev).slot;
                if slot >= 1 {
                    open.remove_slot(&mut arena, slot);
                }
            }

            best_by_host.insert(net.host(next).id(), candidate);
            open.insert(&mut arena, [total, hops], candidate);
        }
    }

    None
}

// =============================================================================
// λ ≠ 0: PARETO-FRONTIER SEARCH WITH BRANCH-AND-BOUND
// =============================================================================

fn shortest_congested(
    net: &Network,
    origin: HostIdx,
    destination: HostIdx,
    min_bandwidth: i64,
    congestion_factor: i64,
) -> Option<Route> {
    let mut arena = LabelArena::default();
    let mut open: IndexedHeap<LabelArena, 2> = IndexedHeap::new(false);
    let mut frontier_by_host: HashIndex<Vec<LabelId>> =
        HashIndex::with_capacity(ROUTE_INDEX_CAPACITY);

    let start = arena.push(origin, 0, 0, None, net.host(origin).id());
    frontier_by_host.insert(net.host(origin).id(), vec![start]);
    open.insert(&mut arena, [0, 0], start);

    let mut best_dest: Option<LabelId> = None;
    let mut best_dest_latency = i64::MAX;

    while let Some(state) = open.extract(&mut arena) {
        // Once an incumbent exists, nothing extracted at or above its cost
        // can improve it; the whole remaining queue is worse.
        if best_dest.is_some() && arena.get(state).total_latency >= best_dest_latency {
            break;
        }

        let current = arena.get(state).host;

        for &edge in net.host(current).links() {
            if !traversable(net, current, edge, min_bandwidth) {
                continue;
            }

            let bd = net.backdoor(edge);
            let next = bd.other_end(current);

            // Step index i = hops + 1, so the congestion term is λ·hops.
            let penalty = congestion_factor.saturating_mul(arena.get(state).hops);
            let total = arena
                .get(state)
                .total_latency
                .saturating_add(bd.latency())
                .saturating_add(penalty);
            let hops = arena.get(state).hops + 1;

            let candidate = arena.push(next, total, hops, Some(state), net.host(next).id());

            if best_dest.is_some() && total > best_dest_latency {
                continue;
            }

            // Destination labels fold into the running best and are never
            // expanded further.
            if next == destination {
                let improves =
                    best_dest.is_none_or(|held| arena.ranking(candidate, held) == Ordering::Less);
                if improves {
                    best_dest = Some(candidate);
                    best_dest_latency = total;
                }
                continue;
            }

            if let Some(frontier) = frontier_by_host.find_mut(net.host(next).id()) {
                if frontier
                    .iter()
                    .any(|&held| arena.dominates(held, candidate))
                {
                    continue;
                }

                // Evict everything the candidate dominates, including any
                // copy still pending in the open set.
                let mut i = 0;
                while i < frontier.len() {
                    let held = frontier[i];
                    if arena.dominates(candidate, held) {
                        let slot = arena.get(held).slot;
                        if slot >= 1 {
                            open.remove_slot(&mut arena, slot);
                        }
                        frontier.swap_remove(i);
                    } else {
                        i += 1;
                    }
                }
                frontier.push(candidate);
            } else {
                frontier_by_host.insert(net.host(next).id(), vec![candidate]);
            }

            open.insert(&mut arena, [total, hops], candidate);
        }
    }

    best_dest.map(|label| build_route(net, &arena, label))
}

// =============================================================================
// TESTS
// =============================================================================
