//! # Network Model
//!
//! Owns every host and backdoor, plus the topology version counter that is
//! the sole cache-invalidation signal. Hosts and backdoors live in arenas
//! and are addressed by stable indices; the registry maps identifiers to
//! host indices through the crate's own [`HashIndex`].
//!
//! Mutations validate fully before touching state: a failed call leaves the
//! network byte-identical, including the version counter.

use crate::index::HashIndex;
use crate::types::{Backdoor, EdgeIdx, Host, HostIdx, MeshError, pair_key};

/// The mutable topology: hosts, backdoors, and the version counter.
#[derive(Debug, Default)]
pub struct Network {
    registry: HashIndex<HostIdx>,
    hosts: Vec<Host>,
    backdoors: Vec<Backdoor>,
    version: u64,
}

impl Network {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonically increasing counter, bumped on every structural or
    /// sealed-state mutation. No mutation goes unreported.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    #[must_use]
    pub fn backdoor_count(&self) -> usize {
        self.backdoors.len()
    }

    /// Resolve a host identifier to its arena index.
    #[must_use]
    pub fn find_host(&self, id: &str) -> Option<HostIdx> {
        self.registry.find(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.registry.find(id).is_some()
    }

    /// The host at `idx`. Indices handed out by this network are always
    /// valid; hosts are never removed.
    #[must_use]
    pub fn host(&self, idx: HostIdx) -> &Host {
        &self.hosts[idx.0]
    }

    #[must_use]
    pub fn backdoor(&self, idx: EdgeIdx) -> &Backdoor {
        &self.backdoors[idx.0]
    }

    /// All hosts with their arena indices, in creation order.
    pub fn hosts(&self) -> impl Iterator<Item = (HostIdx, &Host)> {
        self.hosts
            .iter()
            .enumerate()
            .map(|(i, host)| (HostIdx(i), host))
    }

    /// All backdoors in creation order.
    pub fn backdoors(&self) -> impl Iterator<Item = &Backdoor> {
        self.backdoors.iter()
    }

    /// Resolve the backdoor between two hosts via the canonical pair key.
    #[must_use]
    pub fn find_backdoor(&self, host1: HostIdx, host2: HostIdx) -> Option<EdgeIdx> {
        let key = pair_key(self.host(host1).id(), self.host(host2).id());
        self.host(host1).find_link(&key)
    }

    /// Create a host. Fails with `HostExists` on a duplicate identifier.
    pub fn create_host(&mut self, id: &str, clearance: i64) -> Result<HostIdx, MeshError> {
        if self.contains(id) {
            return Err(MeshError::HostExists(id.to_owned()));
        }

        let idx = HostIdx(self.hosts.len());
        self.hosts.push(Host::new(id, clearance));
        self.registry.insert(id, idx);
        self.version += 1;
        Ok(idx)
    }

    /// Create a backdoor between two existing hosts.
    ///
    /// Validates endpoint distinctness, uniqueness of the pair, and the
    /// attribute ranges (latency > 0, bandwidth > 0, firewall ≥ 0) before
    /// any state change.
    pub fn create_backdoor(
        &mut self,
        host1: HostIdx,
        host2: HostIdx,
        latency: i64,
        bandwidth: i64,
        firewall: i64,
    ) -> Result<EdgeIdx, MeshError> {
        if host1 == host2 {
            return Err(MeshError::SameHost(self.host(host1).id().to_owned()));
        }
        if self.find_backdoor(host1, host2).is_some() {
            return Err(MeshError::BackdoorExists(
                self.host(host1).id().to_owned(),
                self.host(host2).id().to_owned(),
            ));
        }
        if latency <= 0 {
            return Err(MeshError::InvalidLatency(latency));
        }
        if bandwidth <= 0 {
            return Err(MeshError::InvalidBandwidth(bandwidth));
        }
        if firewall < 0 {
            return Err(MeshError::InvalidFirewall(firewall));
        }

        let key = pair_key(self.host(host1).id(), self.host(host2).id());
        let idx = EdgeIdx(self.backdoors.len());
        self.backdoors
            .push(Backdoor::new(key.clone(), host1, host2, latency, bandwidth, firewall));
        self.hosts[host1.0].attach(&key, idx);
        self.hosts[host2.0].attach(&key, idx);
        self.version += 1;
        Ok(idx)
    }

    /// Toggle the sealed state of a backdoor. Returns the new state.
    pub fn toggle_seal(&mut self, edge: EdgeIdx) -> bool {
        let sealed = self.backdoors[edge.0].toggle_seal();
        self.version += 1;
        sealed
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn network_with_pair() -> (Network, HostIdx, HostIdx) {
        let mut net = Network::new();
        let a = net.create_host("ALPHA", 5).expect("host");
        let b = net.create_host("BRAVO", 3).expect("host");
        (net, a, b)
    }

    #[test]
    fn create_host_registers_and_bumps_version() {
        let mut net = Network::new();
        assert_eq!(net.version(), 0);

        let idx = net.create_host("ALPHA", 7).expect("host");
        assert_eq!(net.version(), 1);
        assert_eq!(net.find_host("ALPHA"), Some(idx));
        assert_eq!(net.host(idx).clearance(), 7);
        assert_eq!(net.host_count(), 1);
    }

    #[test]
    fn duplicate_host_is_rejected_without_mutation() {
        let mut net = Network::new();
        net.create_host("ALPHA", 1).expect("host");
        let version = net.version();

        let err = net.create_host("ALPHA", 2);
        assert_eq!(err, Err(MeshError::HostExists("ALPHA".into())));
        assert_eq!(net.version(), version);
        assert_eq!(net.host_count(), 1);
    }

    #[test]
    fn create_backdoor_links_both_hosts() {
        let (mut net, a, b) = network_with_pair();

        let edge = net.create_backdoor(a, b, 10, 100, 2).expect("backdoor");
        assert_eq!(net.find_backdoor(a, b), Some(edge));
        assert_eq!(net.find_backdoor(b, a), Some(edge));
        assert_eq!(net.host(a).links(), &[edge]);
        assert_eq!(net.host(b).links(), &[edge]);
        assert_eq!(net.backdoor(edge).key(), "BRAVOALPHA");
    }

    #[test]
    fn duplicate_backdoor_is_rejected_from_either_direction() {
        let (mut net, a, b) = network_with_pair();
        net.create_backdoor(a, b, 10, 100, 0).expect("backdoor");
        let version = net.version();

        assert!(matches!(
            net.create_backdoor(b, a, 5, 50, 0),
            Err(MeshError::BackdoorExists(_, _))
        ));
        assert_eq!(net.version(), version);
        assert_eq!(net.backdoor_count(), 1);
    }

    #[test]
    fn backdoor_attribute_validation() {
        let (mut net, a, b) = network_with_pair();

        assert_eq!(
            net.create_backdoor(a, a, 10, 100, 0),
            Err(MeshError::SameHost("ALPHA".into()))
        );
        assert_eq!(
            net.create_backdoor(a, b, 0, 100, 0),
            Err(MeshError::InvalidLatency(0))
        );
        assert_eq!(
            net.create_backdoor(a, b, 10, -1, 0),
            Err(MeshError::InvalidBandwidth(-1))
        );
        assert_eq!(
            net.create_backdoor(a, b, 10, 100, -2),
            Err(MeshError::InvalidFirewall(-2))
        );
        // No partial mutation from any failed attempt.
        assert_eq!(net.backdoor_count(), 0);
        assert_eq!(net.version(), 2);
    }

    #[test]
    fn toggle_seal_flips_state_and_always_bumps_version() {
        let (mut net, a, b) = network_with_pair();
        let edge = net.create_backdoor(a, b, 10, 100, 0).expect("backdoor");
        let version = net.version();

        assert!(net.toggle_seal(edge));
        assert!(net.backdoor(edge).is_sealed());
        assert_eq!(net.version(), version + 1);

        assert!(!net.toggle_seal(edge));
        assert!(!net.backdoor(edge).is_sealed());
        assert_eq!(net.version(), version + 2);
    }

    #[test]
    fn hosts_iterate_in_creation_order() {
        let (net, a, b) = network_with_pair();
        let ids: Vec<&str> = net.hosts().map(|(_, h)| h.id()).collect();
        assert_eq!(ids, vec!["ALPHA", "BRAVO"]);
        assert_eq!(net.hosts().map(|(i, _)| i).collect::<Vec<_>>(), vec![a, b]);
    }
}
