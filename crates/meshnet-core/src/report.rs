//! # Aggregate Report
//!
//! The structured network snapshot behind the `oracle_report` command:
//! totals, connectivity, and the two one-decimal averages.
//!
//! Averages are carried as integer tenths rounded half-up (away from zero)
//! so the engine stays float-free; only the presentation layer turns them
//! into `"12.3"` strings.

use serde::{Deserialize, Serialize};

/// Aggregate snapshot over the whole network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkReport {
    /// All hosts ever created.
    pub total_hosts: usize,
    /// Backdoors currently unsealed.
    pub unsealed_backdoors: usize,
    /// True when 0 or 1 hosts exist, or everything is one component.
    pub connected: bool,
    /// Component count with the degenerate convention applied.
    pub components: usize,
    /// Whether the unsealed graph contains a cycle.
    pub has_cycle: bool,
    /// Average bandwidth over unsealed backdoors, in tenths. 0 when no
    /// backdoor is unsealed.
    pub avg_bandwidth_tenths: i64,
    /// Average clearance over all hosts, in tenths. 0 when no hosts exist.
    pub avg_clearance_tenths: i64,
}

/// `sum / count` to one decimal place as integer tenths, rounded half-up
/// (away from zero). A zero `count` yields 0.
#[must_use]
pub fn ratio_tenths_half_up(sum: i64, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }

    let scaled = u128::from(sum.saturating_mul(10).unsigned_abs());
    let divisor = count as u128;
    // floor((2·|p| + q) / 2q) == round-half-up(|p| / q)
    let tenths = i64::try_from((2 * scaled + divisor) / (2 * divisor)).unwrap_or(i64::MAX);

    if sum < 0 { tenths.saturating_neg() } else { tenths }
}

/// Render integer tenths with exactly one decimal place.
#[must_use]
pub fn format_tenths(tenths: i64) -> String {
    let magnitude = tenths.unsigned_abs();
    let sign = if tenths < 0 { "-" } else { "" };
    format!("{sign}{}.{}", magnitude / 10, magnitude % 10)
}

// =============================================================================
// TESTS
// =============================================================================
