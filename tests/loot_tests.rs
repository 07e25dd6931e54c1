//! Loot scoring and selection tests.

use dungeon_mcts::core::{CombatState, Combatant, Move, MoveMap, MoveStats};
use dungeon_mcts::loot::{EnemyRoster, LootEvaluator, LootOption, RewardCategory};
use dungeon_mcts::mcts::SearchConfig;
use dungeon_mcts::score_reward;

const ROSTER: &str = r#"{"enemies": {
    "floor_1": {
        "room_2": {"health": 14, "shield": 2, "moves": {
            "rock": {"damage": 3, "shield": 1},
            "paper": {"damage": 2, "shield": 2},
            "scissor": {"damage": 4, "shield": 0}}},
        "room_3": {"health": 18, "shield": 4, "moves": {
            "rock": {"damage": 5, "shield": 2},
            "paper": {"damage": 3, "shield": 3},
            "scissor": {"damage": 4, "shield": 1}}}
    },
    "floor_2": {
        "room_1": {"health": 30, "shield": 6, "moves": {
            "rock": {"damage": 7, "shield": 2},
            "paper": {"damage": 4, "shield": 5},
            "scissor": {"damage": 6, "shield": 2}}}
    }
}}"#;

const OPTIONS: &str = r#"[
    {"boonTypeString": "UpgradeRock", "selectedVal1": 3, "selectedVal2": 1},
    {"boonTypeString": "AddMaxArmor", "selectedVal1": 2, "selectedVal2": 0},
    {"boonTypeString": "Heal", "selectedVal1": 8, "selectedVal2": 0}
]"#;

fn player_state(health: i32) -> CombatState {
    let stats = MoveMap {
        rock: MoveStats::new(5, 1),
        paper: MoveStats::new(2, 4),
        scissor: MoveStats::new(4, 2),
    };
    let placeholder = MoveMap::with_value(MoveStats::new(1, 1));
    CombatState::new(
        Combatant::new(24, 6, stats).with_health(health),
        Combatant::new(10, 0, placeholder),
    )
}

fn evaluator(seed: u64) -> LootEvaluator {
    LootEvaluator::new(&SearchConfig::default().with_seed(seed)).with_rollouts(40)
}

// =============================================================================
// Static Scores
// =============================================================================

#[test]
fn test_score_reward_categories() {
    assert_eq!(score_reward("UpgradeRock", 3.0, 1.0), 11.0);
    assert_eq!(score_reward("UpgradePaper", 3.0, 1.0), 9.0);
    assert_eq!(score_reward("UpgradeScissor", 3.0, 1.0), 10.0);
    assert_eq!(score_reward("AddMaxArmor", 2.0, 0.0), 8.0);
    assert_eq!(score_reward("AddMaxHealth", 2.0, 0.0), 6.0);
    assert_eq!(score_reward("Heal", 8.0, 0.0), 16.0);
    assert_eq!(score_reward("SomethingNew", 8.0, 1.5), 9.5);
}

#[test]
fn test_options_from_wire() {
    let options: Vec<LootOption> = serde_json::from_str(OPTIONS).unwrap();

    assert_eq!(options.len(), 3);
    assert_eq!(options[0].category, RewardCategory::Upgrade(Move::Rock));
    let descriptions: Vec<String> = options.iter().map(ToString::to_string).collect();
    assert_eq!(
        descriptions,
        vec!["Rock: +3 DMG, +1 Shield", "Max Shield +2", "Heal +8 HP"]
    );

    let json = serde_json::to_string(&options[1]).unwrap();
    assert!(json.contains("\"boonTypeString\":\"AddMaxArmor\""));
}

// =============================================================================
// Simulation-backed Selection
// =============================================================================

#[test]
fn test_roster_positions() {
    let roster: EnemyRoster = serde_json::from_str(ROSTER).unwrap();

    assert_eq!(roster.len(), 3);
    assert_eq!(roster.after(1, 2).count(), 2);
    assert_eq!(roster.after(1, 3).count(), 1);
    assert_eq!(roster.after(2, 1).count(), 0);
}

#[test]
fn test_selection_is_deterministic() {
    let roster: EnemyRoster = serde_json::from_str(ROSTER).unwrap();
    let options: Vec<LootOption> = serde_json::from_str(OPTIONS).unwrap();
    let state = player_state(20);

    let a = evaluator(5).select(&options, &state, &roster, 1, 1).unwrap();
    let b = evaluator(5).select(&options, &state, &roster, 1, 1).unwrap();

    assert_eq!(a, b);
    assert!(a.unwrap() < options.len());
}

#[test]
fn test_low_health_restricts_to_healing() {
    let roster: EnemyRoster = serde_json::from_str(ROSTER).unwrap();
    let options: Vec<LootOption> = serde_json::from_str(OPTIONS).unwrap();

    // 6/24 health: only the heal qualifies.
    let choice = evaluator(3)
        .select(&options, &player_state(6), &roster, 1, 1)
        .unwrap();

    assert_eq!(choice, Some(2));
}

#[test]
fn test_full_health_skips_heal() {
    let roster: EnemyRoster = serde_json::from_str(ROSTER).unwrap();
    let options: Vec<LootOption> = serde_json::from_str(OPTIONS).unwrap();

    let choice = evaluator(3)
        .select(&options, &player_state(24), &roster, 1, 1)
        .unwrap();

    assert_ne!(choice, Some(2));
}

#[test]
fn test_future_rate_in_unit_range() {
    let roster: EnemyRoster = serde_json::from_str(ROSTER).unwrap();
    let option = LootOption::new("UpgradeScissor", 2, 2);
    let mut eval = evaluator(11);

    let rate = eval
        .future_win_rate(&option, &player_state(18), &roster, 1, 1)
        .unwrap();
    assert!((0.0..=1.0).contains(&rate));

    let past_end = eval
        .future_win_rate(&option, &player_state(18), &roster, 2, 1)
        .unwrap();
    assert_eq!(past_end, 0.5);
}
