//! Randomised checks that movement never ends inside scenery.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rstest::rstest;
use test_utils::fixtures::{small_config, WorldBuilder};
use wildlands::collision::{try_move, Mover};
use wildlands::geometry::BoundingShape;
use wildlands::world::World;

fn generated_world(seed: u64) -> World {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    World::generate(&small_config().world, &mut rng)
}

fn wander(world: &World, shape: BoundingShape, seed: u64, steps: usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let inset = 8.0;
    let start = world
        .random_open_point(&mut rng, 0.0, shape, inset, 500)
        .expect("open start point");
    let mut mover = Mover {
        position: start,
        shape,
        inset,
    };
    for step in 0..steps {
        let delta = Vec2::new(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0));
        let before = mover.position;
        let applied = try_move(world, &mut mover, delta);
        assert!(
            !world.collides(&shape.at(mover.position)),
            "step {step}: {shape:?} overlaps scenery at {:?}",
            mover.position
        );
        assert_eq!(mover.position - before, applied, "step {step}: applied delta mismatch");
        assert!(
            applied.x.abs() <= delta.x.abs() + 1e-3
                && applied.y.abs() <= delta.y.abs() + 1e-3,
            "step {step}: moved {applied:?} for requested {delta:?}"
        );
        let lo = Vec2::splat(inset);
        let hi = world.size() - lo;
        assert!(
            mover.position.cmpge(lo).all() && mover.position.cmple(hi).all(),
            "step {step}: left the inset bounds at {:?}",
            mover.position
        );
    }
}

#[rstest]
#[case::player_rect(BoundingShape::Rect { size: Vec2::new(20.0, 26.0) }, 1)]
#[case::monster_circle(BoundingShape::Circle { radius: 15.0 }, 2)]
#[case::tiny_circle(BoundingShape::Circle { radius: 2.0 }, 3)]
fn random_walks_never_overlap_scenery(#[case] shape: BoundingShape, #[case] seed: u64) {
    let world = generated_world(seed);
    wander(&world, shape, seed, 2_000);
}

#[rstest]
fn random_walks_in_a_crowded_yard_never_overlap() {
    let mut builder = WorldBuilder::new(Vec2::new(400.0, 400.0)).safe_zone(20.0, 0.0);
    for row in 0_u8..4 {
        for col in 0_u8..4 {
            let center = Vec2::new(60.0 + 90.0 * f32::from(col), 60.0 + 90.0 * f32::from(row));
            builder = if (row + col) % 2 == 0 {
                builder.rock(center, 18.0)
            } else {
                builder.house(center - Vec2::splat(15.0), Vec2::splat(30.0))
            };
        }
    }
    let world = builder.build();
    wander(&world, BoundingShape::Rect { size: Vec2::new(20.0, 26.0) }, 9, 3_000);
    wander(&world, BoundingShape::Circle { radius: 10.0 }, 10, 3_000);
}

#[rstest]
fn blocked_move_leaves_position_unchanged() {
    let world = WorldBuilder::new(Vec2::new(200.0, 200.0))
        .safe_zone(10.0, 0.0)
        .house(Vec2::new(100.0, 0.0), Vec2::new(100.0, 200.0))
        .build();
    let mut mover = Mover {
        position: Vec2::new(85.0, 100.0),
        shape: BoundingShape::Circle { radius: 10.0 },
        inset: 0.0,
    };
    let applied = try_move(&world, &mut mover, Vec2::new(10.0, 0.0));
    assert_eq!(applied, Vec2::ZERO);
    assert_eq!(mover.position, Vec2::new(85.0, 100.0));
}
