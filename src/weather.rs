use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};

use crate::config::FeedConfig;
use crate::types::Temperature;

/// Generate a daily temperature series for `days` feed days.
///
/// Baseline days draw from Normal(base_mean, base_sigma). Heatwave onsets
/// arrive as a Poisson process (λ scaled from per-360-days to the horizon);
/// each episode gets a uniform duration and draws from the hotter regime.
/// Episodes may overlap; a day inside any episode uses the heatwave model.
///
/// Deterministic for a given rng seed — the ledger under test sees the same
/// weather on every run.
pub fn generate_series(config: &FeedConfig, days: u64, rng: &mut impl Rng) -> Vec<Temperature> {
    let mut heatwave_day = vec![false; days as usize];

    if config.heatwave_frequency > 0.0 && days > 0 {
        let lambda = config.heatwave_frequency * days as f64 / 360.0;
        let poisson = Poisson::new(lambda).expect("invalid Poisson lambda");
        let onsets = poisson.sample(rng) as u64;
        for _ in 0..onsets {
            let start = rng.random_range(0..days);
            let duration =
                rng.random_range(config.heatwave_min_days..=config.heatwave_max_days);
            for d in start..(start + duration).min(days) {
                heatwave_day[d as usize] = true;
            }
        }
    }

    let base = Normal::new(config.base_mean, config.base_sigma).expect("invalid base Normal");
    let hot =
        Normal::new(config.heatwave_mean, config.heatwave_sigma).expect("invalid heatwave Normal");

    heatwave_day
        .iter()
        .map(|&is_hot| {
            let model = if is_hot { &hot } else { &base };
            Temperature(model.sample(rng).round() as i32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;
    use crate::config::ScenarioConfig;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    fn config() -> FeedConfig {
        ScenarioConfig::canonical().feed
    }

    #[test]
    fn series_has_one_sample_per_day() {
        let series = generate_series(&config(), 360, &mut rng());
        assert_eq!(series.len(), 360);
    }

    #[test]
    fn same_seed_same_series() {
        let a = generate_series(&config(), 360, &mut rng());
        let b = generate_series(&config(), 360, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = generate_series(&config(), 360, &mut ChaCha20Rng::seed_from_u64(1));
        let b = generate_series(&config(), 360, &mut ChaCha20Rng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn zero_frequency_means_baseline_only() {
        let cfg = FeedConfig { heatwave_frequency: 0.0, ..config() };
        let series = generate_series(&cfg, 3600, &mut rng());
        // Baseline Normal(24, 5): an extreme (≥40) day is a >3σ draw. Allow a
        // handful over 3600 days but nothing like a sustained run.
        let extreme = series.iter().filter(|t| t.0 >= 40).count();
        assert!(extreme < 20, "too many extreme days without heatwaves: {extreme}");
    }

    #[test]
    fn heatwaves_produce_sustained_extremes() {
        // High frequency, long episodes: a 5-day run at ≥40 must show up
        // somewhere in a year of feed.
        let cfg = FeedConfig {
            heatwave_frequency: 12.0,
            heatwave_min_days: 7,
            heatwave_max_days: 12,
            ..config()
        };
        let series = generate_series(&cfg, 360, &mut rng());
        let sustained = series
            .windows(5)
            .any(|w| w.iter().all(|t| t.0 >= 40));
        assert!(sustained, "expected at least one 5-day extreme run");
    }

    #[test]
    fn empty_horizon_yields_empty_series() {
        let series = generate_series(&config(), 0, &mut rng());
        assert!(series.is_empty());
    }
}
