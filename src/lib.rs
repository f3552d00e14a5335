//! Parametric weather-triggered micro-insurance ledger.
//!
//! Holders pay a premium to open a policy; daily temperature broadcasts
//! shift every policy's rolling 5-day window; when all five samples of an
//! active policy sit at or above the extreme threshold, the ledger pays
//! `premium × multiplier` from its pool and closes the policy. Mutating
//! operations return the domain events they emitted; the binary drives the
//! ledger from a simulated feed and writes the log as NDJSON.

pub mod analysis;
pub mod config;
pub mod events;
pub mod ledger;
pub mod policy;
pub mod types;
pub mod weather;
