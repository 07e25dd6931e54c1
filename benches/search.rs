//! Search benchmarks.
//!
//! Run with: `cargo bench`
//!
//! Covers full searches at several iteration budgets, both rollout
//! policies, and a single rollout.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dungeon_mcts::core::{CombatState, Combatant, GameRng, MoveMap, MoveStats};
use dungeon_mcts::mcts::{
    GuidedRollout, MCTSSearch, RandomRollout, SearchConfig, SimulationPolicy, UniformOpponent,
};
use dungeon_mcts::rules::CombatRules;

fn opening() -> CombatState {
    let player = MoveMap {
        rock: MoveStats::new(6, 2),
        paper: MoveStats::new(3, 5),
        scissor: MoveStats::new(4, 3),
    };
    let opponent = MoveMap {
        rock: MoveStats::new(5, 1),
        paper: MoveStats::new(2, 4),
        scissor: MoveStats::new(4, 2),
    };
    CombatState::new(Combatant::new(30, 10, player), Combatant::new(40, 8, opponent))
}

// =============================================================================
// Full Search Benchmarks
// =============================================================================

fn bench_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_iterations");
    let state = opening();

    for iterations in [100u32, 1_000, 5_000] {
        group.throughput(Throughput::Elements(u64::from(iterations)));
        group.bench_with_input(
            BenchmarkId::new("random_rollout", iterations),
            &iterations,
            |b, &iterations| {
                b.iter(|| {
                    let mut search = MCTSSearch::new(SearchConfig::default().with_seed(42));
                    black_box(search.search(&state, iterations).unwrap())
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("guided_rollout", iterations),
            &iterations,
            |b, &iterations| {
                b.iter(|| {
                    let mut search = MCTSSearch::new(SearchConfig::default().with_seed(42))
                        .with_simulation(GuidedRollout::default());
                    black_box(search.search(&state, iterations).unwrap())
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Rollout Benchmarks
// =============================================================================

fn bench_rollout(c: &mut Criterion) {
    let rules = CombatRules::default();
    let state = opening();
    let mut rng = GameRng::new(7);

    c.bench_function("random_rollout", |b| {
        b.iter(|| black_box(RandomRollout.simulate(&rules, &state, &UniformOpponent, &mut rng)))
    });
}

criterion_group!(benches, bench_search_iterations, bench_rollout);
criterion_main!(benches);
