//! Weapon plugin: the player firing state machine.
//!
//! # Philosophy
//! The controller is split along the time axis, not along features. The
//! per-tick half (guards, release edge, melee override) lives in
//! `controller`; everything that happens *later* is a deferred task drained
//! by `tasks::dispatch_due_tasks` and consumed in `firing`. Shared actor
//! flags live in `player::ActorState`; this plugin is one of several
//! writers and never assumes exclusive ownership.
//!
//! # One shot, end to end
//! ```text
//! Update (every frame, in order)
//! ┌────────────────────────────────────────────────────────────────────┐
//! │ (A) gather_fire_input: poll held / release edge once per tick      │
//! │ (B) tasks::dispatch_due_tasks: due deferred work -> TaskDue msgs   │
//! │ (C) firing::execute_fire (TaskDue::Fire):                          │
//! │       pool acquire -> pose + activate, ShotCue,                    │
//! │       schedule ResetFireTime / CanAct, muzzle flash, recoil,       │
//! │       spread (replace), screen shake                               │
//! │ (D) firing::finish_cooldown_and_recovery:                          │
//! │       ResetFireTime -> ready_to_fire                               │
//! │       CanAct        -> restore act/move, drop rotation grant       │
//! │ (E) controller::tick_fire_controller:                              │
//! │       release edge -> input guards -> melee override               │
//! │       acceptance schedules Fire after startup_delay                │
//! │ (F) aim::snap_to_target: consume the acceptance's snap request     │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exactly one fire sequence is in flight per controller: acceptance clears
//! `ready_to_fire` in the same tick, and every later guard check re-reads it.

pub mod aim;
pub mod components;
pub mod config;
pub mod controller;
pub mod firing;
pub mod messages;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::Player;
use crate::plugins::projectiles::pool::ProjectilePool;
use crate::plugins::tasks;

use components::FireController;
use config::WeaponConfig;

pub struct WeaponPlugin;

/// The weapon every player spawns with.
fn default_loadout() -> WeaponConfig {
    WeaponConfig::default()
}

/// Attach the default weapon to a freshly spawned, unarmed player.
fn arm_player(mut commands: Commands, q: Query<Entity, (With<Player>, Without<FireController>)>) {
    for e in &q {
        commands
            .entity(e)
            .insert(FireController::new(default_loadout()));
    }
}

/// Fail fast on setup errors: a configured pool key without a bucket would
/// otherwise surface as permanent silent dry-fire mid-game.
fn validate_weapon_setup(pool: Res<ProjectilePool>) {
    let cfg = default_loadout();
    pool.bucket(cfg.projectile)
        .expect("no pool bucket for the default weapon's projectile");
    if let Some(flash) = cfg.muzzle_flash {
        pool.bucket(flash)
            .expect("no pool bucket for the default weapon's muzzle flash");
    }
}

/// Maintain the weapon message buffers.
fn update_weapon_messages(
    mut snaps: ResMut<Messages<messages::AimSnapRequest>>,
    mut cues: ResMut<Messages<messages::ShotCue>>,
) {
    snaps.update();
    cues.update();
}

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<components::FireInput>();
        app.init_resource::<firing::SpreadRng>();
        app.init_resource::<Messages<messages::AimSnapRequest>>();
        app.init_resource::<Messages<messages::ShotCue>>();

        app.add_systems(Startup, validate_weapon_setup);
        app.add_systems(PostUpdate, update_weapon_messages);

        app.add_systems(
            Update,
            (
                arm_player,
                controller::gather_fire_input,
                firing::execute_fire.after(tasks::dispatch_due_tasks),
                firing::finish_cooldown_and_recovery.after(tasks::dispatch_due_tasks),
                controller::tick_fire_controller
                    .after(controller::gather_fire_input)
                    .after(firing::execute_fire)
                    .after(firing::finish_cooldown_and_recovery),
                aim::snap_to_target.after(controller::tick_fire_controller),
            )
                .run_if(in_state(GameState::InGame)),
        );
    }
}
