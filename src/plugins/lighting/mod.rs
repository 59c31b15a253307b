//! Lighting plugin (Firefly) (render-only).
//!
//! One point light rides the player and flares briefly on every shot, fed by
//! the same `ShotCue` messages the audio path consumes.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::Player;
use crate::plugins::weapon::messages::ShotCue;

const GLOW_DECAY_PER_SEC: f32 = 9.0;

#[derive(Component)]
pub struct PlayerLight {
    base_range: f32,
    /// Muzzle flare intensity in [0..1]; decays every frame.
    glow: f32,
}

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, (follow_player_light, flare_on_shots));
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight {
            base_range: 450.0,
            glow: 0.0,
        },
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            range: 450.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player_light(
    q_player: Query<&Transform, (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<&mut Transform, (With<PlayerLight>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
}

/// Kick the glow to full on a shot, then let it fall off.
fn flare_on_shots(
    time: Res<Time>,
    mut cues: MessageReader<ShotCue>,
    mut q_light: Query<(&mut PlayerLight, &mut PointLight2d)>,
) {
    let Ok((mut light, mut point)) = q_light.single_mut() else {
        cues.clear();
        return;
    };

    if cues.read().count() > 0 {
        light.glow = 1.0;
    }
    light.glow = (light.glow - GLOW_DECAY_PER_SEC * time.delta_secs()).max(0.0);

    point.range = light.base_range * (1.0 + 0.3 * light.glow);
}
