//! Practice targets: static bodies for the aim lock to snap to and for
//! bullets to hit. Hit resolution just recycles the bullet; targets keep no
//! health here.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::Occluder2d;

use crate::common::{layers::Layer, state::GameState};

#[derive(Component)]
pub struct Target;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_targets);
}

/// Spawn a few stationary targets.
///
/// Intentionally asset-free: plain sprites and simple colliders.
pub fn spawn_targets(mut commands: Commands) {
    let target_layers = CollisionLayers::new(
        Layer::Target,
        [Layer::World, Layer::Player, Layer::PlayerBullet],
    );

    for (i, x) in [-200.0, 0.0, 200.0].into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Target{i}")),
            Target,
            Sprite {
                color: Color::srgb(0.9, 0.25, 0.25),
                custom_size: Some(Vec2::splat(32.0)),
                ..default()
            },
            Transform::from_xyz(x, 120.0, 1.0),
            RigidBody::Static,
            Collider::circle(16.0),
            target_layers,
            Occluder2d::circle(16.0),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

#[cfg(test)]
mod tests;
