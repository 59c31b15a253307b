//! The deferred half of the firing state machine: the Fire task itself plus
//! the two state-restoring tasks it schedules.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::tunables::Tunables;
use crate::plugins::effects::ScreenShake;
use crate::plugins::player::{ActorState, Player};
use crate::plugins::projectiles::pool::{self, ProjectilePool};
use crate::plugins::tasks::{DeferredTasks, TaskDue, TaskKind};

use super::components::FireController;
use super::messages::ShotCue;

/// Seeded RNG for aim spread; deterministic under test.
#[derive(Resource)]
pub struct SpreadRng(StdRng);

impl SpreadRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Uniform offset in `[-spread, +spread]` degrees, returned in radians.
    pub fn spread_radians(&mut self, spread_deg: f32) -> f32 {
        if spread_deg <= 0.0 {
            return 0.0;
        }
        self.0.gen_range(-spread_deg..=spread_deg).to_radians()
    }
}

impl Default for SpreadRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Consume due `Fire` tasks: spawn the projectile and apply every side
/// effect of the shot.
///
/// Degradation rules: a dry pool skips only the affected sub-step. No
/// projectile means no cue, but the cooldown/recovery machinery still runs;
/// a missing muzzle flash skips only the flash.
#[allow(clippy::too_many_arguments)]
pub fn execute_fire(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut due: MessageReader<TaskDue>,
    mut tasks: ResMut<DeferredTasks>,
    mut pool: ResMut<ProjectilePool>,
    mut rng: ResMut<SpreadRng>,
    mut shake: ResMut<ScreenShake>,
    mut cues: MessageWriter<ShotCue>,
    mut q: Query<(&mut FireController, &mut Transform, &mut LinearVelocity), With<Player>>,
) {
    for task in due.read() {
        if task.kind != TaskKind::Fire {
            continue;
        }
        let Ok((mut ctl, mut tf, mut vel)) = q.get_mut(task.owner) else {
            continue;
        };

        let pos = tf.translation.truncate();
        let aim = ctl.aim_angle();

        if pool::acquire(&mut commands, &mut pool, ctl.config.projectile, true, pos, aim).is_some()
        {
            cues.write(ShotCue {
                shooter: task.owner,
            });
        }

        let now = time.elapsed();
        tasks.schedule(now, task.owner, TaskKind::ResetFireTime, ctl.config.fire_interval);
        tasks.schedule(now, task.owner, TaskKind::CanAct, ctl.config.cancel_time);

        // Independent lookup, independently tolerant.
        if let Some(flash) = ctl.config.muzzle_flash {
            let _ = pool::acquire(&mut commands, &mut pool, flash, true, pos, aim);
        }

        // Recoil: impulse opposite the aim axis.
        let dir = Vec2::from_angle(aim);
        vel.0 -= dir * ctl.config.knockback_amount * tunables.recoil_impulse;

        // Spread replaces the previous offset; it never compounds.
        ctl.spread_offset = rng.spread_radians(ctl.config.spread_angle);
        tf.rotation = Quat::from_rotation_z(ctl.aim_angle());

        shake.trigger(
            ctl.config.shake_duration,
            ctl.config.shake_amplitude,
            ctl.config.shake_decay,
        );
    }
}

/// Consume the two state-restoring tasks.
///
/// `ResetFireTime` only re-arms the weapon; it does not touch movement or
/// action flags. `CanAct` restores those and drops the aim-rotation grant.
pub fn finish_cooldown_and_recovery(
    mut due: MessageReader<TaskDue>,
    mut q: Query<(&mut FireController, &mut ActorState), With<Player>>,
) {
    for task in due.read() {
        let Ok((mut ctl, mut actor)) = q.get_mut(task.owner) else {
            continue;
        };

        match task.kind {
            TaskKind::ResetFireTime => {
                actor.ready_to_fire = true;
            }
            TaskKind::CanAct => {
                actor.can_rotate = false;
                actor.can_act = true;
                actor.can_move = true;
                ctl.is_firing = false;
            }
            TaskKind::Fire => {}
        }
    }
}
