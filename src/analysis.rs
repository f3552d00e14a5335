use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::config::LedgerConfig;
use crate::events::{LedgerEvent, LogEntry};
use crate::types::{Amount, Day, HolderId, PolicyId};

/// A ledger invariant broken somewhere in the event log. The verifier replays
/// the log from scratch, so a violation pinpoints the first entry where the
/// stream stops being explainable by the ledger rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerViolation {
    /// A SettlementPaid references a policy id never opened in this log.
    SettlementWithoutPolicy { day: Day, policy_id: PolicyId },
    /// A policy was paid out more than once.
    DuplicateSettlement { day: Day, policy_id: PolicyId },
    /// Payout differs from premium × settlement_multiplier.
    SettlementAmountMismatch {
        day: Day,
        policy_id: PolicyId,
        expected: Amount,
        actual: Amount,
    },
    /// A payout exceeded the replayed pool balance.
    PoolOverdrawn {
        day: Day,
        policy_id: PolicyId,
        required: Amount,
        available: Amount,
    },
    /// A holder opened a second policy while one was still active.
    DuplicateActiveHolder { day: Day, holder: HolderId },
    /// An opened premium sits below the configured minimum.
    PremiumBelowMinimum { day: Day, policy_id: PolicyId, premium: Amount },
}

impl fmt::Display for LedgerViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerViolation::SettlementWithoutPolicy { day, policy_id } => {
                write!(f, "day {}: settlement for unknown policy {}", day.0, policy_id.0)
            }
            LedgerViolation::DuplicateSettlement { day, policy_id } => {
                write!(f, "day {}: policy {} settled twice", day.0, policy_id.0)
            }
            LedgerViolation::SettlementAmountMismatch { day, policy_id, expected, actual } => {
                write!(
                    f,
                    "day {}: policy {} paid {actual}, expected {expected}",
                    day.0, policy_id.0
                )
            }
            LedgerViolation::PoolOverdrawn { day, policy_id, required, available } => {
                write!(
                    f,
                    "day {}: policy {} payout {required} exceeds pool {available}",
                    day.0, policy_id.0
                )
            }
            LedgerViolation::DuplicateActiveHolder { day, holder } => {
                write!(f, "day {}: holder {} opened a second active policy", day.0, holder.0)
            }
            LedgerViolation::PremiumBelowMinimum { day, policy_id, premium } => {
                write!(
                    f,
                    "day {}: policy {} opened with premium {premium} below minimum",
                    day.0, policy_id.0
                )
            }
        }
    }
}

/// Aggregate statistics over one run's event log.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub policies_opened: u64,
    pub settlements_paid: u64,
    pub settlements_failed: u64,
    pub total_premiums: Amount,
    pub total_payouts: Amount,
    /// Replayed pool balance: initial + premiums − payouts.
    pub final_pool: Amount,
}

struct ReplayedPolicy {
    holder: HolderId,
    premium: Amount,
    settled: bool,
}

/// Replay `log` against the ledger rules in `config` and collect every
/// violation. An empty result means the stream is fully explained by the
/// open/broadcast/settle semantics.
pub fn verify_ledger(log: &[LogEntry], config: &LedgerConfig) -> Vec<LedgerViolation> {
    let mut violations = Vec::new();
    let mut policies: HashMap<PolicyId, ReplayedPolicy> = HashMap::new();
    let mut active_holders: HashSet<HolderId> = HashSet::new();
    let mut pool: Amount = config.initial_pool;

    for entry in log {
        match &entry.event {
            LedgerEvent::PolicyOpened { policy_id, holder, premium } => {
                if *premium < config.min_premium {
                    violations.push(LedgerViolation::PremiumBelowMinimum {
                        day: entry.day,
                        policy_id: *policy_id,
                        premium: *premium,
                    });
                }
                if !active_holders.insert(*holder) {
                    violations.push(LedgerViolation::DuplicateActiveHolder {
                        day: entry.day,
                        holder: *holder,
                    });
                }
                policies.insert(
                    *policy_id,
                    ReplayedPolicy { holder: *holder, premium: *premium, settled: false },
                );
                pool += premium;
            }
            LedgerEvent::SettlementPaid { policy_id, amount, .. } => {
                let Some(policy) = policies.get_mut(policy_id) else {
                    violations.push(LedgerViolation::SettlementWithoutPolicy {
                        day: entry.day,
                        policy_id: *policy_id,
                    });
                    continue;
                };
                if policy.settled {
                    violations.push(LedgerViolation::DuplicateSettlement {
                        day: entry.day,
                        policy_id: *policy_id,
                    });
                    continue;
                }
                let expected = policy.premium * config.settlement_multiplier;
                if *amount != expected {
                    violations.push(LedgerViolation::SettlementAmountMismatch {
                        day: entry.day,
                        policy_id: *policy_id,
                        expected,
                        actual: *amount,
                    });
                }
                if *amount > pool {
                    violations.push(LedgerViolation::PoolOverdrawn {
                        day: entry.day,
                        policy_id: *policy_id,
                        required: *amount,
                        available: pool,
                    });
                    pool = 0;
                } else {
                    pool -= amount;
                }
                policy.settled = true;
                active_holders.remove(&policy.holder);
            }
            LedgerEvent::TemperatureRecorded { .. } | LedgerEvent::SettlementFailed { .. } => {}
        }
    }

    violations
}

/// Totals for the run summary table.
pub fn summarize(log: &[LogEntry], config: &LedgerConfig) -> RunStats {
    let mut stats = RunStats { final_pool: config.initial_pool, ..RunStats::default() };
    for entry in log {
        match &entry.event {
            LedgerEvent::PolicyOpened { premium, .. } => {
                stats.policies_opened += 1;
                stats.total_premiums += premium;
                stats.final_pool += premium;
            }
            LedgerEvent::SettlementPaid { amount, .. } => {
                stats.settlements_paid += 1;
                stats.total_payouts += amount;
                stats.final_pool = stats.final_pool.saturating_sub(*amount);
            }
            LedgerEvent::SettlementFailed { .. } => stats.settlements_failed += 1,
            LedgerEvent::TemperatureRecorded { .. } => {}
        }
    }
    stats
}
