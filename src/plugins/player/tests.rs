use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;

use super::{ActorState, Dash, MeleeSwing, Player, PlayerInput};

fn time_with_delta(dt: f32) -> Time {
    let mut t = Time::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}

#[test]
fn spawn_creates_player_with_actor_state() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn);

    let mut q = world.query::<(&Player, &ActorState)>();
    let (_, actor) = q.iter(&world).next().expect("player should exist");
    assert!(actor.can_act);
    assert!(actor.can_move);
    assert!(actor.ready_to_fire);
    assert!(!actor.is_shooting);
}

#[test]
fn apply_movement_sets_velocity() {
    let mut world = World::new();
    world.insert_resource(Tunables {
        player_speed: 100.0,
        ..default()
    });
    world.insert_resource(PlayerInput {
        move_axis: Vec2::new(1.0, 0.0),
    });
    world.spawn((Player, ActorState::default(), LinearVelocity::ZERO));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec2::new(100.0, 0.0));
}

#[test]
fn movement_is_ignored_while_locked() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(PlayerInput {
        move_axis: Vec2::new(0.0, 1.0),
    });

    let actor = ActorState {
        can_move: false,
        ..default()
    };
    // Recoil left some velocity behind; movement must not stomp it.
    world.spawn((Player, actor, LinearVelocity(Vec2::new(-40.0, 0.0))));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec2::new(-40.0, 0.0));
}

#[test]
fn dash_uses_dash_speed() {
    let mut world = World::new();
    world.insert_resource(Tunables {
        player_speed: 100.0,
        dash_speed: 300.0,
        ..default()
    });
    world.insert_resource(PlayerInput {
        move_axis: Vec2::new(1.0, 0.0),
    });

    let actor = ActorState {
        is_dashing: true,
        ..default()
    };
    world.spawn((Player, actor, LinearVelocity::ZERO));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec2::new(300.0, 0.0));
}

#[test]
fn dash_interrupting_a_fire_hold_flags_cancelled_firing() {
    let mut world = World::new();
    world.insert_resource(time_with_delta(0.016));

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ShiftLeft);
    world.insert_resource(keys);

    let actor = ActorState {
        is_shooting: true,
        ..default()
    };
    let e = world.spawn((Player, Dash::default(), actor)).id();

    run_system_once(&mut world, super::dash_action);

    let actor = world.get::<ActorState>(e).unwrap();
    assert!(actor.is_dashing);
    assert!(actor.cancelled_firing);
}

#[test]
fn dash_without_fire_hold_does_not_cancel() {
    let mut world = World::new();
    world.insert_resource(time_with_delta(0.016));

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ShiftLeft);
    world.insert_resource(keys);

    let e = world
        .spawn((Player, Dash::default(), ActorState::default()))
        .id();

    run_system_once(&mut world, super::dash_action);

    let actor = world.get::<ActorState>(e).unwrap();
    assert!(actor.is_dashing);
    assert!(!actor.cancelled_firing);
}

#[test]
fn melee_flag_clears_after_the_swing() {
    let mut world = World::new();
    world.insert_resource(time_with_delta(0.016));

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyJ);
    world.insert_resource(keys);

    let e = world
        .spawn((Player, MeleeSwing::default(), ActorState::default()))
        .id();

    run_system_once(&mut world, super::melee_action);
    assert!(world.get::<ActorState>(e).unwrap().is_melee_attacking);

    // Key released, swing window elapses.
    world.resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::KeyJ);
    world.resource_mut::<ButtonInput<KeyCode>>().clear();
    world.insert_resource(time_with_delta(0.3));

    run_system_once(&mut world, super::melee_action);
    assert!(!world.get::<ActorState>(e).unwrap().is_melee_attacking);
}
