//! Pooled instance behaviour after activation: propulsion, lifetime bound,
//! collision return. The fire controller only ever sets pose + activation;
//! everything from that point on is this module's business.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{Lifetime, PoolState, Pooled, Projectile};

/// Give freshly acquired bullets their velocity along the barrel axis.
pub fn launch_bullets(
    tunables: Res<Tunables>,
    mut q: Query<(&Transform, &mut PoolState, &mut LinearVelocity), With<Projectile>>,
) {
    for (tf, mut state, mut vel) in &mut q {
        if *state != PoolState::Launching {
            continue;
        }
        let dir = (tf.rotation * Vec3::X).truncate();
        vel.0 = dir * tunables.bullet_speed;
        *state = PoolState::Active;
    }
}

/// Bound every live instance's lifetime; expiry marks it for return.
pub fn tick_lifetimes(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut Lifetime, &mut PoolState), With<Pooled>>,
) {
    for (mut lifetime, mut state) in &mut q {
        if matches!(*state, PoolState::Inactive | PoolState::PendingReturn) {
            continue;
        }
        lifetime.tick(time.delta());
        if lifetime.is_finished() {
            *state = PoolState::PendingReturn;
        }
    }
}

/// Return bullets that hit something.
///
/// No damage is applied here; a hit just recycles the bullet.
pub fn process_bullet_hits(
    mut started: MessageReader<CollisionStart>,
    mut q_bullets: Query<&mut PoolState, With<Projectile>>,
) {
    for ev in started.read() {
        let a = ev.collider1;
        let b = ev.collider2;

        // Exactly one side must be a bullet.
        let b1 = q_bullets.contains(a);
        let b2 = q_bullets.contains(b);
        if !(b1 ^ b2) {
            continue;
        }
        let bullet = if b1 { a } else { b };

        let Ok(mut state) = q_bullets.get_mut(bullet) else {
            continue;
        };
        if *state != PoolState::Active {
            continue;
        }
        *state = PoolState::PendingReturn;
    }
}
