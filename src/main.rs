use std::fs::File;
use std::io::{BufWriter, Write};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use wxins::analysis::{self, LedgerViolation, RunStats};
use wxins::config::ScenarioConfig;
use wxins::events::{EventLog, LogEntry};
use wxins::ledger::Ledger;
use wxins::types::{Day, HolderId};
use wxins::weather;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut seed_override: Option<u64> = None;
    let mut days_override: Option<u64> = None;
    let mut holders_override: Option<u64> = None;
    let mut output_path = "events.ndjson".to_string();
    let mut quiet = false;
    let mut runs: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed_override = Some(args[i].parse().expect("--seed requires a u64"));
            }
            "--days" => {
                i += 1;
                days_override = Some(args[i].parse().expect("--days requires a u64"));
            }
            "--holders" => {
                i += 1;
                holders_override = Some(args[i].parse().expect("--holders requires a u64"));
            }
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            "--quiet" => quiet = true,
            "--runs" => {
                i += 1;
                runs = Some(args[i].parse().expect("--runs requires a positive integer"));
            }
            _ => {}
        }
        i += 1;
    }

    let mut base_config = ScenarioConfig::canonical();
    let start_seed = seed_override.unwrap_or(base_config.seed);
    if let Some(d) = days_override {
        base_config.days = d;
    }
    if let Some(h) = holders_override {
        base_config.holders = h;
    }

    if let Some(n) = runs {
        use rayon::prelude::*;

        let all_stats: Vec<RunStats> = (0u64..n)
            .into_par_iter()
            .map(|i| {
                let mut config = base_config.clone();
                config.seed = start_seed + i;
                let log = run_scenario(&config);
                analysis::summarize(&log, &config.ledger)
            })
            .collect();

        if !quiet {
            print_multi_run(&all_stats, start_seed);
        }
    } else {
        let mut config = base_config;
        config.seed = start_seed;

        let log = run_scenario(&config);

        let file = File::create(&output_path).expect("failed to create output file");
        let mut writer = BufWriter::new(file);
        for e in &log {
            serde_json::to_writer(&mut writer, e).expect("failed to serialize event");
            writeln!(writer).expect("failed to write newline");
        }

        if !quiet {
            println!("Log entries: {}", log.len());
            print_analysis(&log, &config);
        }
    }
}

/// One full scenario: every holder opens a policy on day 0, the feed drives
/// a broadcast per day, and settled holders re-open the next day.
fn run_scenario(config: &ScenarioConfig) -> EventLog {
    let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
    let series = weather::generate_series(&config.feed, config.days, &mut rng);

    let mut ledger = Ledger::new(config.ledger.clone());
    let mut log: EventLog = Vec::new();
    let mut day = Day(0);

    for h in 1..=config.holders {
        let (_, events) = ledger
            .open_policy(HolderId(h), config.premium)
            .expect("fresh holders open exactly one policy each");
        log.extend(events.into_iter().map(|event| LogEntry { day, event }));
    }

    for temperature in series {
        day = day.next();
        let events = ledger.broadcast_temperature(temperature);
        log.extend(events.into_iter().map(|event| LogEntry { day, event }));

        // Settled holders come back for fresh cover the same day.
        for h in 1..=config.holders {
            if let Ok((_, events)) = ledger.open_policy(HolderId(h), config.premium) {
                log.extend(events.into_iter().map(|event| LogEntry { day, event }));
            }
        }
    }

    log
}

fn print_analysis(log: &[LogEntry], config: &ScenarioConfig) {
    let violations = analysis::verify_ledger(log, &config.ledger);

    let inv = |variant: fn(&LedgerViolation) -> bool| {
        if violations.iter().any(variant) { "FAIL" } else { "PASS" }
    };

    println!("\n=== Ledger invariants ===");
    println!("  [1] Settlement references opened policy: {}", inv(|v| matches!(v, LedgerViolation::SettlementWithoutPolicy { .. })));
    println!("  [2] Settlement paid at most once:        {}", inv(|v| matches!(v, LedgerViolation::DuplicateSettlement { .. })));
    println!("  [3] Payout = premium × multiplier:       {}", inv(|v| matches!(v, LedgerViolation::SettlementAmountMismatch { .. })));
    println!("  [4] Pool never overdrawn:                {}", inv(|v| matches!(v, LedgerViolation::PoolOverdrawn { .. })));
    println!("  [5] One active policy per holder:        {}", inv(|v| matches!(v, LedgerViolation::DuplicateActiveHolder { .. })));
    println!("  [6] Premiums above minimum:              {}", inv(|v| matches!(v, LedgerViolation::PremiumBelowMinimum { .. })));

    if violations.is_empty() {
        println!("  All ledger invariants: PASS");
    } else {
        println!("\n  {} violation(s):", violations.len());
        for v in &violations {
            println!("    {v}");
        }
    }

    let stats = analysis::summarize(log, &config.ledger);
    println!("\n=== Run summary ===");
    println!("  policies opened:    {}", stats.policies_opened);
    println!("  settlements paid:   {}", stats.settlements_paid);
    println!("  settlements failed: {}", stats.settlements_failed);
    println!("  premiums in:        {}", stats.total_premiums);
    println!("  payouts out:        {}", stats.total_payouts);
    println!("  final pool:         {}", stats.final_pool);
}

fn print_multi_run(all_stats: &[RunStats], start_seed: u64) {
    println!("\n=== Per-seed summary ===");
    println!(
        "{:>6} | {:>8} | {:>8} | {:>8} | {:>24} | {:>24}",
        "Seed", "Opened", "Paid", "Failed", "Payouts", "FinalPool"
    );
    println!("{}", "-".repeat(92));
    for (i, s) in all_stats.iter().enumerate() {
        println!(
            "{:>6} | {:>8} | {:>8} | {:>8} | {:>24} | {:>24}",
            start_seed + i as u64,
            s.policies_opened,
            s.settlements_paid,
            s.settlements_failed,
            s.total_payouts,
            s.final_pool,
        );
    }

    let n = all_stats.len() as f64;
    if n > 0.0 {
        let mean_paid =
            all_stats.iter().map(|s| s.settlements_paid as f64).sum::<f64>() / n;
        let max_paid = all_stats.iter().map(|s| s.settlements_paid).max().unwrap_or(0);
        println!("\n  mean settlements/run: {mean_paid:.2}   max: {max_paid}");
    }
}
