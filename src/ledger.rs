use thiserror::Error;

use crate::config::LedgerConfig;
use crate::events::LedgerEvent;
use crate::policy::{Policy, PolicyStatus};
use crate::types::{Amount, HolderId, PolicyId, Temperature};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("premium {offered} is below the minimum {minimum}")]
    PremiumTooLow { offered: Amount, minimum: Amount },
    #[error("holder {0:?} already has an active policy")]
    DuplicateActivePolicy(HolderId),
    #[error("no policy with id {0:?}")]
    UnknownPolicy(PolicyId),
    #[error("policy {0:?} is already closed")]
    PolicyAlreadyClosed(PolicyId),
    #[error("pool balance {available} cannot cover payout {required}")]
    InsufficientPoolFunds { required: Amount, available: Amount },
}

/// The insurance ledger aggregate. All mutation goes through `&mut self`,
/// so a single owner (or one lock around the ledger) serializes every
/// operation; each call either fully commits or returns an error with the
/// ledger untouched.
///
/// Policies live in an append-only arena: the insertion index is the
/// externally visible `PolicyId` and stays valid for the record's whole
/// lifetime. Closed policies remain as historical records.
pub struct Ledger {
    config: LedgerConfig,
    policies: Vec<Policy>,
    /// Balance available to pay settlements. Funded at construction and by
    /// incoming premiums; every payout deducts in the same step that closes
    /// the policy, so it can never be overdrawn.
    pool: Amount,
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Self {
        let pool = config.initial_pool;
        Ledger { config, policies: Vec::new(), pool }
    }

    pub fn pool(&self) -> Amount {
        self.pool
    }

    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn get_policy(&self, id: PolicyId) -> Result<&Policy, LedgerError> {
        self.policies
            .get(id.0 as usize)
            .ok_or(LedgerError::UnknownPolicy(id))
    }

    fn has_active_policy(&self, holder: HolderId) -> bool {
        self.policies
            .iter()
            .any(|p| p.holder == holder && p.is_active())
    }

    /// Open a policy for `holder`. Validation happens before any mutation:
    /// a rejected call leaves the ledger untouched.
    pub fn open_policy(
        &mut self,
        holder: HolderId,
        premium: Amount,
    ) -> Result<(PolicyId, Vec<LedgerEvent>), LedgerError> {
        if premium < self.config.min_premium {
            return Err(LedgerError::PremiumTooLow {
                offered: premium,
                minimum: self.config.min_premium,
            });
        }
        if self.has_active_policy(holder) {
            return Err(LedgerError::DuplicateActivePolicy(holder));
        }

        let policy_id = PolicyId(self.policies.len() as u64);
        self.policies.push(Policy::new(holder, premium));
        self.pool += premium;

        Ok((policy_id, vec![LedgerEvent::PolicyOpened { policy_id, holder, premium }]))
    }

    /// Pure trigger predicate: all five window samples at or above the
    /// configured extreme threshold.
    pub fn should_pay_settlement(&self, policy: &Policy) -> bool {
        policy.window.all_at_least(self.config.extreme_threshold)
    }

    /// Shift every policy's window, closed ones included, then settle each
    /// Active policy whose window now
    /// passes the trigger. Structurally infallible: a payout the pool cannot
    /// fund is reported as `SettlementFailed` and the policy stays Active.
    pub fn broadcast_temperature(&mut self, new: Temperature) -> Vec<LedgerEvent> {
        let mut events = Vec::with_capacity(self.policies.len());

        for (idx, policy) in self.policies.iter_mut().enumerate() {
            policy.window = policy.window.shifted(new);
            events.push(LedgerEvent::TemperatureRecorded {
                policy_id: PolicyId(idx as u64),
                temperature: new,
            });
        }

        for idx in 0..self.policies.len() {
            let policy_id = PolicyId(idx as u64);
            if !self.policies[idx].is_active() || !self.should_pay_settlement(&self.policies[idx]) {
                continue;
            }
            match self.settle(policy_id) {
                Ok(settled) => events.extend(settled),
                Err(LedgerError::InsufficientPoolFunds { required, available }) => {
                    events.push(LedgerEvent::SettlementFailed { policy_id, required, available });
                }
                // Active was checked above; settle cannot report anything else.
                Err(_) => unreachable!("settle on a checked active policy"),
            }
        }

        events
    }

    /// Pay out and close one policy. The pool deduction and the status
    /// transition commit together; on any error nothing changes and the
    /// policy stays as it was.
    pub fn settle(&mut self, id: PolicyId) -> Result<Vec<LedgerEvent>, LedgerError> {
        let policy = self
            .policies
            .get(id.0 as usize)
            .ok_or(LedgerError::UnknownPolicy(id))?;
        if policy.status == PolicyStatus::Closed {
            return Err(LedgerError::PolicyAlreadyClosed(id));
        }

        let payout = policy.premium * self.config.settlement_multiplier;
        if self.pool < payout {
            return Err(LedgerError::InsufficientPoolFunds {
                required: payout,
                available: self.pool,
            });
        }

        let holder = policy.holder;
        self.pool -= payout;
        self.policies[id.0 as usize].status = PolicyStatus::Closed;

        Ok(vec![LedgerEvent::SettlementPaid { policy_id: id, holder, amount: payout }])
    }
}
