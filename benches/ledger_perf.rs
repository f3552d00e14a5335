use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use wxins::config::ScenarioConfig;
use wxins::ledger::Ledger;
use wxins::types::{HolderId, Temperature};

fn populated_ledger(policies: usize) -> Ledger {
    let mut ledger = Ledger::new(ScenarioConfig::canonical().ledger);
    for h in 1..=policies as u64 {
        ledger
            .open_policy(HolderId(h), 1_000_000_000)
            .expect("distinct holders always open");
    }
    ledger
}

// ── Group 1: broadcast — window shift over the whole book ───────────────────

fn bench_broadcast(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast");
    for &policy_count in &[100usize, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(policy_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(policy_count),
            &policy_count,
            |b, &pc| {
                b.iter_batched(
                    || populated_ledger(pc),
                    // 25 is below threshold: pure shift cost, no settlements.
                    |mut ledger| ledger.broadcast_temperature(Temperature(25)),
                    BatchSize::LargeInput,
                )
            },
        );
    }
    group.finish();
}

// ── Group 2: settlement_sweep — a heatwave day that settles everything ──────

fn bench_settlement_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("settlement_sweep");
    group.sample_size(20);
    for &policy_count in &[100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(policy_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(policy_count),
            &policy_count,
            |b, &pc| {
                b.iter_batched(
                    || {
                        let mut ledger = populated_ledger(pc);
                        // Four extreme days in; the measured fifth pays out.
                        for _ in 0..4 {
                            ledger.broadcast_temperature(Temperature(42));
                        }
                        ledger
                    },
                    |mut ledger| ledger.broadcast_temperature(Temperature(42)),
                    BatchSize::LargeInput,
                )
            },
        );
    }
    group.finish();
}

// ── Group 3: open_policy — O(n) active-holder scan cost ─────────────────────

fn bench_open_policy(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_policy");
    for &book_size in &[100usize, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(book_size),
            &book_size,
            |b, &n| {
                b.iter_batched(
                    || populated_ledger(n),
                    // Worst case: a brand-new holder scans the whole book.
                    |mut ledger| ledger.open_policy(HolderId(u64::MAX), 1_000_000_000),
                    BatchSize::LargeInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_broadcast, bench_settlement_sweep, bench_open_policy);
criterion_main!(benches);
