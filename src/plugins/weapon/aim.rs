//! Aim lock: snap the shooter toward the nearest target.
//!
//! Fire-and-forget. A request with no targets in the world is dropped; the
//! shooter keeps its current heading.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::plugins::player::Player;
use crate::plugins::targets::Target;

use super::components::FireController;
use super::messages::AimSnapRequest;

pub fn snap_to_target(
    mut requests: MessageReader<AimSnapRequest>,
    q_targets: Query<&Transform, (With<Target>, Without<Player>)>,
    mut q_shooter: Query<(&mut FireController, &mut Transform), With<Player>>,
) {
    for req in requests.read() {
        let Ok((mut ctl, mut tf)) = q_shooter.get_mut(req.shooter) else {
            continue;
        };
        let origin = tf.translation.truncate();

        let Some(target) = q_targets.iter().min_by(|a, b| {
            let da = a.translation.truncate().distance_squared(origin);
            let db = b.translation.truncate().distance_squared(origin);
            da.total_cmp(&db)
        }) else {
            continue;
        };

        let to = target.translation.truncate() - origin;
        if to.length_squared() < 1e-4 {
            continue;
        }

        ctl.heading = to.y.atan2(to.x);
        tf.rotation = Quat::from_rotation_z(ctl.aim_angle());
    }
}
