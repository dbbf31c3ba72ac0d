//! Utility helpers for tests.
//!
//! Fixture builders for worlds, monsters and whole simulation sessions, plus
//! a headless bevy app wired with the simulation driver.

pub mod app;
pub mod fixtures;
pub mod sim;

/// Assert that two vectors are within `epsilon` of each other.
///
/// # Panics
/// Panics with both values when they differ by more than `epsilon`.
pub fn assert_vec2_near(actual: glam::Vec2, expected: glam::Vec2, epsilon: f32) {
    assert!(
        actual.distance(expected) <= epsilon,
        "expected {expected:?}, got {actual:?}"
    );
}
