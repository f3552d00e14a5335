use serde::Serialize;

use crate::types::{Amount, HolderId, Temperature};

/// Number of samples in the rolling observation window.
pub const WINDOW_DAYS: usize = 5;

/// Fixed 5-slot rolling buffer of the most recent temperature observations,
/// oldest first. New policies start with every slot at
/// `Temperature::UNOBSERVED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemperatureWindow(pub [Temperature; WINDOW_DAYS]);

impl TemperatureWindow {
    pub fn unobserved() -> Self {
        TemperatureWindow([Temperature::UNOBSERVED; WINDOW_DAYS])
    }

    /// Left-rotate-and-append: drop the oldest sample, move the remaining
    /// four toward "oldest", append `new` as the newest.
    pub fn shifted(self, new: Temperature) -> Self {
        let [_, b, c, d, e] = self.0;
        TemperatureWindow([b, c, d, e, new])
    }

    /// True iff every sample in the window is at or above `threshold`.
    /// A single cooler sample resets eligibility.
    pub fn all_at_least(&self, threshold: Temperature) -> bool {
        self.0.iter().all(|t| *t >= threshold)
    }

    pub fn newest(&self) -> Temperature {
        self.0[WINDOW_DAYS - 1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PolicyStatus {
    Active,
    Closed,
}

/// A single insurance contract between the ledger and a holder.
/// The ledger's insertion index is the externally visible policy id; the
/// record itself carries no id and is never deleted, only closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Policy {
    pub holder: HolderId,
    /// Premium paid at open time, smallest currency unit. Immutable; the
    /// basis for the settlement payout.
    pub premium: Amount,
    pub window: TemperatureWindow,
    pub status: PolicyStatus,
}

impl Policy {
    /// Fresh policy as `open_policy` creates it: unobserved window, Active.
    pub fn new(holder: HolderId, premium: Amount) -> Self {
        Policy {
            holder,
            premium,
            window: TemperatureWindow::unobserved(),
            status: PolicyStatus::Active,
        }
    }

    /// Value constructor with an explicit window, for scenario evaluation
    /// without committing anything to a ledger.
    pub fn with_window(holder: HolderId, premium: Amount, samples: [Temperature; WINDOW_DAYS]) -> Self {
        Policy {
            holder,
            premium,
            window: TemperatureWindow(samples),
            status: PolicyStatus::Active,
        }
    }

    /// Non-mutating shift: the same rotate-and-append rule the ledger applies
    /// during a broadcast, returned as a new value.
    pub fn with_shifted(&self, new: Temperature) -> Policy {
        Policy { window: self.window.shifted(new), ..self.clone() }
    }

    pub fn is_active(&self) -> bool {
        self.status == PolicyStatus::Active
    }
}
