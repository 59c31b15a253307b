use std::time::Duration;

use bevy::prelude::*;

use crate::common::test_utils::run_system_once;

use super::{ScreenShake, apply_screen_shake};

fn set_time_delta(world: &mut World, dt: f32) {
    let mut t = Time::default();
    t.advance_by(Duration::from_secs_f32(dt));
    world.insert_resource(t);
}

#[test]
fn trigger_opens_a_shake_window_that_drains_at_decay_speed() {
    let mut shake = ScreenShake::default();
    assert!(!shake.is_active());

    shake.trigger(0.1, 1.0, 2.0);
    assert!(shake.is_active());

    // decay 2.0 means the 0.1s window drains in 0.05s of frame time.
    shake.advance(0.025);
    assert!(shake.is_active());
    shake.advance(0.025);
    assert!(!shake.is_active());
}

#[test]
fn trigger_replaces_a_running_shake() {
    let mut shake = ScreenShake::default();
    shake.trigger(10.0, 5.0, 1.0);
    shake.trigger(0.1, 1.0, 1.0);

    // The second trigger's window is in charge now.
    shake.advance(0.2);
    assert!(!shake.is_active());
}

#[test]
fn camera_is_offset_while_shaking() {
    let mut world = World::new();
    world.init_resource::<ScreenShake>();
    world
        .resource_mut::<ScreenShake>()
        .trigger(1.0, 4.0, 1.0);

    let cam = world
        .spawn((Camera2d, Transform::from_xyz(7.0, -3.0, 999.0)))
        .id();

    set_time_delta(&mut world, 0.016);
    run_system_once(&mut world, apply_screen_shake);

    let tf = world.get::<Transform>(cam).unwrap();
    let moved = Vec2::new(tf.translation.x - 7.0, tf.translation.y + 3.0);
    assert!(moved.length() > 0.0, "camera should be displaced mid-shake");
    assert!(moved.length() <= 4.0 + 1e-3, "offset bounded by amplitude");
}

#[test]
fn camera_returns_home_after_the_shake_ends() {
    let mut world = World::new();
    world.init_resource::<ScreenShake>();
    world
        .resource_mut::<ScreenShake>()
        .trigger(0.05, 4.0, 1.0);

    let cam = world
        .spawn((Camera2d, Transform::from_xyz(7.0, -3.0, 999.0)))
        .id();

    // Run past the end of the window; the final pass removes the last offset.
    for _ in 0..8 {
        set_time_delta(&mut world, 0.016);
        run_system_once(&mut world, apply_screen_shake);
    }

    let tf = world.get::<Transform>(cam).unwrap();
    assert!((tf.translation.x - 7.0).abs() < 1e-4);
    assert!((tf.translation.y + 3.0).abs() < 1e-4);
}
