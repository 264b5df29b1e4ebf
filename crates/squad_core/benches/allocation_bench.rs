use criterion::{black_box, criterion_group, criterion_main, Criterion};

use squad_core::allocation::{allocate_with_seed, FairnessEvaluator, TeamBalancer};
use squad_core::config::AllocationConfig;
use squad_core::models::PlayerRecord;
use squad_core::stats::interquartile_spread;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// 4 GK, 8 DF, 8 MF, 8 ST with spread tiers
fn roster() -> Vec<PlayerRecord> {
    let mut players = Vec::with_capacity(28);
    for i in 0..4 {
        players.push(PlayerRecord::new(format!("GK{}", i), 2.5 + i as f64 * 0.3, "GK"));
    }
    for position in ["DF", "MF", "ST"] {
        for i in 0..8 {
            let tier = 1.0 + ((i * 7) % 9) as f64 * 0.45;
            players.push(PlayerRecord::new(format!("{}{}", position, i), tier, position));
        }
    }
    players
}

fn bench_balance(c: &mut Criterion) {
    let players = roster();
    let balancer = TeamBalancer::from_config(&AllocationConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    c.bench_function("balance_28_players", |b| {
        b.iter(|| balancer.balance(black_box(&players), 2, &mut rng))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let config = AllocationConfig::default();
    let balancer = TeamBalancer::from_config(&config);
    let evaluator = FairnessEvaluator::from_config(&config);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let teams = balancer.balance(&roster(), 2, &mut rng).unwrap();
    c.bench_function("evaluate_two_teams", |b| b.iter(|| evaluator.evaluate(black_box(&teams))));
}

fn bench_allocate(c: &mut Criterion) {
    let players = roster();
    let config = AllocationConfig { players_per_team: 14, ..AllocationConfig::strict() };
    c.bench_function("allocate_strict_28_players", |b| {
        b.iter(|| allocate_with_seed(black_box(&players), black_box(&config), 42))
    });
}

fn bench_iqr(c: &mut Criterion) {
    let samples: Vec<f64> = (0..64).map(|i| ((i * 37) % 50) as f64 / 10.0).collect();
    c.bench_function("interquartile_spread_64", |b| {
        b.iter(|| interquartile_spread(black_box(&samples)))
    });
}

criterion_group!(benches, bench_balance, bench_evaluate, bench_allocate, bench_iqr);
criterion_main!(benches);
