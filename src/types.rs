use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HolderId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PolicyId(pub u64);

/// Feed time in days. The ledger itself is day-agnostic; `Day` only stamps
/// log entries so a run can be replayed in broadcast order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Day(pub u64);

impl Day {
    pub fn next(self) -> Self {
        Day(self.0 + 1)
    }
}

/// Whole-degree temperature observation. Signed: the feed can go below zero
/// even though only the hot tail ever matters for settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Temperature(pub i32);

impl Temperature {
    /// Sentinel for window slots that have never seen a real observation.
    /// Sits below any representable threshold, so a policy cannot trigger
    /// until five genuine samples have been broadcast.
    pub const UNOBSERVED: Temperature = Temperature(i32::MIN);
}

/// Monetary amount in the smallest currency unit.
/// u128 because wei-scale premiums (1e18) times the settlement multiplier
/// overflow u64.
pub type Amount = u128;
