use crate::types::{Amount, Temperature};

/// Ledger construction constants. Fixed for the life of the ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Smallest premium `open_policy` accepts.
    pub min_premium: Amount,
    /// Payout = premium × this factor.
    pub settlement_multiplier: Amount,
    /// Inclusive floor for a sample to count as extreme.
    pub extreme_threshold: Temperature,
    /// Pool funding supplied at construction, before any premiums arrive.
    pub initial_pool: Amount,
}

/// Simulated daily-temperature feed parameters. Degrees are whole °C-scale
/// integers; the model only needs a plausible hot tail, not climatology.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Baseline daily temperature ~ Normal(base_mean, base_sigma).
    pub base_mean: f64,
    pub base_sigma: f64,
    /// Poisson λ: expected heatwave onsets per 360 feed days.
    pub heatwave_frequency: f64,
    /// Uniform episode length in days, inclusive bounds.
    pub heatwave_min_days: u64,
    pub heatwave_max_days: u64,
    /// During an episode, daily temperature ~ Normal(heatwave_mean, heatwave_sigma).
    pub heatwave_mean: f64,
    pub heatwave_sigma: f64,
}

#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub seed: u64,
    /// Feed horizon in days.
    pub days: u64,
    /// Holders opening (and re-opening after settlement) policies.
    pub holders: u64,
    /// Premium each holder pays, smallest unit.
    pub premium: Amount,
    pub ledger: LedgerConfig,
    pub feed: FeedConfig,
}

impl ScenarioConfig {
    pub fn canonical() -> Self {
        ScenarioConfig {
            seed: 42,
            days: 360,
            holders: 10,
            premium: 1_000_000_000,
            ledger: LedgerConfig {
                min_premium: 1_000_000_000,
                settlement_multiplier: 100,
                // Inclusive floor: [40,41,40,41,42] counts as a sustained
                // extreme run.
                extreme_threshold: Temperature(40),
                // Covers ~100 payouts at the minimum premium before incoming
                // premiums are counted.
                initial_pool: 10_000_000_000_000,
            },
            feed: FeedConfig {
                base_mean: 24.0,
                base_sigma: 5.0,
                heatwave_frequency: 4.0,
                heatwave_min_days: 3,
                heatwave_max_days: 9,
                heatwave_mean: 43.0,
                heatwave_sigma: 2.0,
            },
        }
    }
}
