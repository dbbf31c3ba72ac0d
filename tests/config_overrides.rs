//! JSON overrides flow through to a running session.

use rstest::rstest;
use test_utils::sim::{run, session, stand_by_vendor};
use wildlands::config::SimulationConfig;
use wildlands::economy::ItemKind;
use wildlands::error::ConfigError;
use wildlands::input::InputIntent;
use wildlands::simulation::SimulationContext;

const OVERRIDES: &str = r#"{
    "world": { "width": 2400.0, "height": 1800.0, "tree_count": 12, "rock_count": 4 },
    "player": { "starting_coins": 7 },
    "monsters": { "count": 5 },
    "economy": { "sword": 5 }
}"#;

#[rstest]
fn overrides_shape_the_session() {
    let config = SimulationConfig::from_json_str(OVERRIDES).expect("valid overrides");
    assert_eq!(config.economy.armor, 80, "unlisted prices keep their defaults");

    let mut sim = session(config, 99);
    assert_eq!(sim.monsters().len(), 5);
    assert_eq!(sim.world().size(), glam::Vec2::new(2_400.0, 1_800.0));
    assert_eq!(sim.player().purse.coins(), 7);

    stand_by_vendor(&mut sim);
    run(&mut sim, &InputIntent::interact(), 1);
    sim.request_purchase(ItemKind::Sword);
    assert_eq!(sim.pending_purchases(), 1);
    run(&mut sim, &InputIntent::default(), 1);
    assert_eq!(sim.pending_purchases(), 0);
    assert_eq!(sim.player().purse.coins(), 2);
}

#[rstest]
fn invalid_configuration_refuses_to_start() {
    let mut config = SimulationConfig::default();
    config.combat.reward_max = config.combat.reward_min;
    let err = SimulationContext::new(config, 1).expect_err("empty reward range");
    assert!(matches!(err, ConfigError::Invalid { .. }), "unexpected error {err}");
}

#[rstest]
#[case::infinite_speed(|c: &mut SimulationConfig| c.monsters.max_speed = f32::INFINITY)]
#[case::nan_delta(|c: &mut SimulationConfig| c.timing.max_delta_secs = f32::NAN)]
#[case::attracting_safe_zone(|c: &mut SimulationConfig| c.monsters.repulsion_accel = -2_400.0)]
#[case::negative_aggro(|c: &mut SimulationConfig| c.monsters.aggro_radius = -1.0)]
fn degenerate_numbers_never_reach_a_session(#[case] tweak: fn(&mut SimulationConfig)) {
    let mut config = SimulationConfig::default();
    tweak(&mut config);
    let err = SimulationContext::new(config, 1).expect_err("degenerate configuration");
    assert!(matches!(err, ConfigError::Invalid { .. }), "unexpected error {err}");
}
