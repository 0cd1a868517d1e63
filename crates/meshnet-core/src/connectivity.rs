//! # Connectivity Analyzer
//!
//! BFS-based component counting with cycle detection over unsealed edges,
//! plus "what if this were removed" scans that ignore a single host or
//! backdoor without mutating the topology.
//!
//! The unrestricted scan is cached against the network's topology version;
//! ignoring scans vary per call and always recompute. Scratch state (the
//! array-backed BFS queue and the epoch-stamped visited set) is owned by
//! the analyzer, grown to the largest traversal seen, and never shrunk.
//! Reuse is safe only because traversals never overlap: the engine is
//! single-threaded by contract.

use crate::network::Network;
use crate::primitives::INITIAL_SCAN_QUEUE_CAPACITY;
use crate::types::{EdgeIdx, HostIdx};
use serde::{Deserialize, Serialize};

/// Result of a single connectivity scan.
///
/// `components` is the raw count (0 for an empty scan); callers wanting the
/// "0 or 1 hosts count as one component" convention go through
/// [`ConnectivityAnalyzer::component_count`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivitySnapshot {
    /// Hosts included in the scan (total minus any ignored host).
    pub hosts_considered: usize,
    /// Number of connected components found.
    pub components: usize,
    /// Whether any traversal re-reached a visited host other than its BFS
    /// parent.
    pub has_cycle: bool,
}

// =============================================================================
// EPOCH-STAMPED VISITED SET
// =============================================================================

/// Membership set keyed by host arena index.
///
/// Reset is O(1): bump the epoch instead of rescanning the stamps. Stamps
/// only match the current epoch, so entries from prior traversals are
/// invisible without being cleared.
#[derive(Debug, Default)]
struct EpochSet {
    stamps: Vec<u32>,
    epoch: u32,
}

impl EpochSet {
    fn reset(&mut self, len: usize) {
        if self.stamps.len() < len {
            self.stamps.resize(len, 0);
        }
        match self.epoch.checked_add(1) {
            Some(next) => self.epoch = next,
            None => {
                // Epoch wrapped; clear every stamp once and start over.
                self.stamps.fill(0);
                self.epoch = 1;
            }
        }
    }

    fn contains(&self, idx: HostIdx) -> bool {
        self.stamps[idx.0] == self.epoch
    }

    fn insert(&mut self, idx: HostIdx) {
        self.stamps[idx.0] = self.epoch;
    }
}

// =============================================================================
// ANALYZER
// =============================================================================

/// Component counter with a version-keyed cache and reusable scratch.
#[derive(Debug)]
pub struct ConnectivityAnalyzer {
    queue: Vec<(HostIdx, Option<HostIdx>)>,
    visited: EpochSet,
    cached: Option<(u64, ConnectivitySnapshot)>,
}

impl Default for ConnectivityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: Vec::with_capacity(INITIAL_SCAN_QUEUE_CAPACITY),
            visited: EpochSet::default(),
            cached: None,
        }
    }

    /// Snapshot of the current full graph, served from cache while the
    /// topology version is unchanged.
    pub fn scan(&mut self, net: &Network) -> ConnectivitySnapshot {
        if let Some((version, snapshot)) = self.cached {
            if version == net.version() {
                return snapshot;
            }
        }

        let snapshot = self.analyze(net, None, None);
        self.cached = Some((net.version(), snapshot));
        snapshot
    }

    /// Component count of the current graph with the degenerate convention
    /// applied: 0 or 1 hosts are treated as exactly one component.
    pub fn component_count(&mut self, net: &Network) -> usize {
        clamp_components(self.scan(net))
    }

    /// Component count if `host` were removed. Never cached.
    pub fn components_without_host(&mut self, net: &Network, host: HostIdx) -> usize {
        clamp_components(self.analyze(net, Some(host), None))
    }

    /// Component count if `edge` were removed. Never cached.
    pub fn components_without_backdoor(&mut self, net: &Network, edge: EdgeIdx) -> usize {
        clamp_components(self.analyze(net, None, Some(edge)))
    }

    /// BFS component scan over unsealed, non-ignored edges.
    fn analyze(
        &mut self,
        net: &Network,
        ignore_host: Option<HostIdx>,
        ignore_edge: Option<EdgeIdx>,
    ) -> ConnectivitySnapshot {
        let considered = net.host_count() - usize::from(ignore_host.is_some());

        if considered <= 1 {
            return ConnectivitySnapshot {
                hosts_considered: considered,
                components: considered.min(1),
                has_cycle: false,
            };
        }

        self.visited.reset(net.host_count());

        let mut components = 0;
        let mut has_cycle = false;

        for (start, _) in net.hosts() {
            if Some(start) == ignore_host || self.visited.contains(start) {
                continue;
            }

            components += 1;
            self.queue.clear();
            self.queue.push((start, None));
            self.visited.insert(start);
            let mut head = 0;

            while head < self.queue.len() {
                let (current, parent) = self.queue[head];
                head += 1;

                for &edge in net.host(current).links() {
                    if Some(edge) == ignore_edge {
                        continue;
                    }
                    let bd = net.backdoor(edge);
                    if bd.is_sealed() {
                        continue;
                    }

                    let neighbor = bd.other_end(current);
                    if Some(neighbor) == ignore_host {
                        continue;
                    }

                    if !self.visited.contains(neighbor) {
                        self.visited.insert(neighbor);
                        self.queue.push((neighbor, Some(current)));
                    } else if Some(neighbor) != parent {
                        // Re-reached through an edge other than the one we
                        // arrived by: a cycle exists.
                        has_cycle = true;
                    }
                }
            }
        }

        ConnectivitySnapshot {
            hosts_considered: considered,
            components,
            has_cycle,
        }
    }
}

/// 0 or 1 considered hosts are fully connected by convention.
fn clamp_components(snapshot: ConnectivitySnapshot) -> usize {
    if snapshot.hosts_considered <= 1 {
        1
    } else {
        snapshot.components
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(ids: &[&str]) -> (Network, Vec<HostIdx>) {
        let mut net = Network::new();
        let hosts: Vec<HostIdx> = ids
            .iter()
            .map(|id| net.create_host(id, 0).expect("host"))
            .collect();
        for pair in hosts.windows(2) {
            net.create_backdoor(pair[0], pair[1], 1, 1, 0).expect("edge");
        }
        (net, hosts)
    }

    #[test]
    fn empty_and_single_host_report_one_component() {
        let mut analyzer = ConnectivityAnalyzer::new();

        let net = Network::new();
        assert_eq!(analyzer.component_count(&net), 1);

        let mut net = Network::new();
        net.create_host("ONLY", 0).expect("host");
        assert_eq!(analyzer.component_count(&net), 1);
    }

    #[test]
    fn disconnected_hosts_are_separate_components() {
        let mut net = Network::new();
        net.create_host("A", 0).expect("host");
        net.create_host("B", 0).expect("host");
        net.create_host("C", 0).expect("host");

        let mut analyzer = ConnectivityAnalyzer::new();
        assert_eq!(analyzer.component_count(&net), 3);
    }

    #[test]
    fn chain_is_one_component_without_cycle() {
        let (net, _) = chain(&["A", "B", "C", "D"]);
        let mut analyzer = ConnectivityAnalyzer::new();

        let snapshot = analyzer.scan(&net);
        assert_eq!(snapshot.components, 1);
        assert!(!snapshot.has_cycle);
    }

    #[test]
    fn single_edge_is_not_a_cycle() {
        // The parent exclusion must not flag the edge just used to arrive.
        let (net, _) = chain(&["A", "B"]);
        let mut analyzer = ConnectivityAnalyzer::new();
        assert!(!analyzer.scan(&net).has_cycle);
    }

    #[test]
    fn triangle_has_a_cycle() {
        let (mut net, hosts) = chain(&["A", "B", "C"]);
        net.create_backdoor(hosts[2], hosts[0], 1, 1, 0).expect("edge");

        let mut analyzer = ConnectivityAnalyzer::new();
        let snapshot = analyzer.scan(&net);
        assert_eq!(snapshot.components, 1);
        assert!(snapshot.has_cycle);
    }

    #[test]
    fn sealed_edge_splits_the_graph() {
        let (mut net, hosts) = chain(&["A", "B", "C"]);
        let edge = net.find_backdoor(hosts[0], hosts[1]).expect("edge");

        let mut analyzer = ConnectivityAnalyzer::new();
        assert_eq!(analyzer.component_count(&net), 1);

        net.toggle_seal(edge);
        assert_eq!(analyzer.component_count(&net), 2);

        net.toggle_seal(edge);
        assert_eq!(analyzer.component_count(&net), 1);
    }

    #[test]
    fn cache_is_keyed_on_topology_version() {
        let (mut net, hosts) = chain(&["A", "B", "C"]);
        let mut analyzer = ConnectivityAnalyzer::new();

        let first = analyzer.scan(&net);
        let second = analyzer.scan(&net);
        assert_eq!(first, second);

        // A seal/unseal pair is a connectivity no-op but advances the
        // version twice; the cache must not serve data from in between.
        let edge = net.find_backdoor(hosts[1], hosts[2]).expect("edge");
        net.toggle_seal(edge);
        assert_eq!(analyzer.component_count(&net), 2);
        net.toggle_seal(edge);
        assert_eq!(analyzer.component_count(&net), 1);
        assert_eq!(analyzer.scan(&net), first);
    }

    #[test]
    fn ignoring_a_cut_host_increases_components() {
        let (net, hosts) = chain(&["A", "B", "C"]);
        let mut analyzer = ConnectivityAnalyzer::new();

        assert_eq!(analyzer.components_without_host(&net, hosts[1]), 2);
        // Endpoints are not cut vertices of a chain.
        assert_eq!(analyzer.components_without_host(&net, hosts[0]), 1);
    }

    #[test]
    fn ignoring_a_bridge_edge_increases_components() {
        let (mut net, hosts) = chain(&["A", "B", "C"]);
        let bridge = net.find_backdoor(hosts[0], hosts[1]).expect("edge");

        let mut analyzer = ConnectivityAnalyzer::new();
        assert_eq!(analyzer.components_without_backdoor(&net, bridge), 2);

        // With a parallel path the same edge is no longer a bridge.
        net.create_backdoor(hosts[0], hosts[2], 1, 1, 0).expect("edge");
        assert_eq!(analyzer.components_without_backdoor(&net, bridge), 1);
    }

    #[test]
    fn ignore_scans_never_pollute_the_cache() {
        let (net, hosts) = chain(&["A", "B", "C"]);
        let mut analyzer = ConnectivityAnalyzer::new();

        assert_eq!(analyzer.component_count(&net), 1);
        assert_eq!(analyzer.components_without_host(&net, hosts[1]), 2);
        // The cached unrestricted result is unchanged.
        assert_eq!(analyzer.component_count(&net), 1);
    }

    #[test]
    fn two_host_network_with_ignored_host_degenerates_to_one() {
        let (net, hosts) = chain(&["A", "B"]);
        let mut analyzer = ConnectivityAnalyzer::new();
        assert_eq!(analyzer.components_without_host(&net, hosts[0]), 1);
    }
}
