//! # Engine Facade
//!
//! The single entry point the console layer talks to. Owns the network and
//! the connectivity analyzer, validates every operation fully before any
//! state change, and returns structured results only; rendering is the
//! caller's job.

use crate::connectivity::ConnectivityAnalyzer;
use crate::network::Network;
use crate::report::{NetworkReport, ratio_tenths_half_up};
use crate::router;
use crate::types::{BreachImpact, HostIdx, MeshError, Route};

/// Facade over the topology engine.
#[derive(Debug, Default)]
pub struct Engine {
    network: Network,
    analyzer: ConnectivityAnalyzer,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the underlying topology.
    #[must_use]
    pub const fn network(&self) -> &Network {
        &self.network
    }

    fn resolve(&self, id: &str) -> Result<HostIdx, MeshError> {
        self.network
            .find_host(id)
            .ok_or_else(|| MeshError::HostNotFound(id.to_owned()))
    }

    /// Create a host with a unique identifier and clearance level.
    pub fn create_host(&mut self, id: &str, clearance: i64) -> Result<(), MeshError> {
        self.network.create_host(id, clearance).map(|_| ())
    }

    /// Create a backdoor between two distinct existing hosts.
    pub fn create_backdoor(
        &mut self,
        id1: &str,
        id2: &str,
        latency: i64,
        bandwidth: i64,
        firewall: i64,
    ) -> Result<(), MeshError> {
        if id1 == id2 {
            return Err(MeshError::SameHost(id1.to_owned()));
        }
        let host1 = self.resolve(id1)?;
        let host2 = self.resolve(id2)?;
        self.network
            .create_backdoor(host1, host2, latency, bandwidth, firewall)
            .map(|_| ())
    }

    /// Toggle the sealed state of the backdoor between two hosts.
    /// Returns the new sealed state.
    pub fn toggle_seal(&mut self, id1: &str, id2: &str) -> Result<bool, MeshError> {
        if id1 == id2 {
            return Err(MeshError::SameHost(id1.to_owned()));
        }

        let edge = self
            .network
            .find_host(id1)
            .zip(self.network.find_host(id2))
            .and_then(|(host1, host2)| self.network.find_backdoor(host1, host2))
            .ok_or_else(|| MeshError::BackdoorNotFound(id1.to_owned(), id2.to_owned()))?;

        Ok(self.network.toggle_seal(edge))
    }

    /// Compute the optimal route under the bandwidth constraint and
    /// congestion factor. `Ok(None)` means no satisfying path exists.
    pub fn find_route(
        &self,
        source: &str,
        destination: &str,
        min_bandwidth: i64,
        congestion_factor: i64,
    ) -> Result<Option<Route>, MeshError> {
        let origin = self.resolve(source)?;
        let target = self.resolve(destination)?;
        Ok(router::find_route(
            &self.network,
            origin,
            target,
            min_bandwidth,
            congestion_factor,
        ))
    }

    /// Connected-component count over unsealed backdoors; 0 or 1 hosts
    /// count as one component.
    pub fn component_count(&mut self) -> usize {
        self.analyzer.component_count(&self.network)
    }

    /// Aggregate snapshot of the whole network.
    pub fn report(&mut self) -> NetworkReport {
        let total_hosts = self.network.host_count();

        let mut unsealed = 0usize;
        let mut bandwidth_sum = 0i64;
        for bd in self.network.backdoors() {
            if !bd.is_sealed() {
                unsealed += 1;
                bandwidth_sum = bandwidth_sum.saturating_add(bd.bandwidth());
            }
        }

        let mut clearance_sum = 0i64;
        for (_, host) in self.network.hosts() {
            clearance_sum = clearance_sum.saturating_add(host.clearance());
        }

        let snapshot = self.analyzer.scan(&self.network);
        let degenerate = snapshot.hosts_considered <= 1;

        NetworkReport {
            total_hosts,
            unsealed_backdoors: unsealed,
            connected: degenerate || snapshot.components == 1,
            components: if degenerate { 1 } else { snapshot.components },
            has_cycle: snapshot.has_cycle,
            avg_bandwidth_tenths: ratio_tenths_half_up(bandwidth_sum, unsealed),
            avg_clearance_tenths: ratio_tenths_half_up(clearance_sum, total_hosts),
        }
    }

    /// Simulate removing a host: is it an articulation point, and how many
    /// components would remain?
    pub fn simulate_host_breach(&mut self, id: &str) -> Result<BreachImpact, MeshError> {
        let host = self.resolve(id)?;

        let base = self.analyzer.component_count(&self.network);
        let after = self.analyzer.components_without_host(&self.network, host);

        Ok(BreachImpact {
            critical: after > base,
            components: after,
        })
    }

    /// Simulate removing a backdoor: is it a bridge, and how many
    /// components would remain? Sealed backdoors are rejected.
    pub fn simulate_backdoor_breach(
        &mut self,
        id1: &str,
        id2: &str,
    ) -> Result<BreachImpact, MeshError> {
        let host1 = self.resolve(id1)?;
        let host2 = self.resolve(id2)?;
        let edge = self
            .network
            .find_backdoor(host1, host2)
            .ok_or_else(|| MeshError::BackdoorNotFound(id1.to_owned(), id2.to_owned()))?;

        if self.network.backdoor(edge).is_sealed() {
            return Err(MeshError::BackdoorSealed(id1.to_owned(), id2.to_owned()));
        }

        let base = self.analyzer.component_count(&self.network);
        let after = self.analyzer.components_without_backdoor(&self.network, edge);

        Ok(BreachImpact {
            critical: after > base,
            components: after,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
