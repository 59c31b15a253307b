//! Screen effects.
//!
//! `ScreenShake` is the single source of truth for camera shake: producers
//! (the fire sequence) call `trigger`, and one PostUpdate consumer applies
//! the offset to the camera. Centralizing the only camera-transform writer
//! here prevents systems fighting over it.
//!
//! The consumer removes the previous frame's offset before applying a new
//! one, so the shake never drifts the camera away from where the follow
//! system put it. Headless apps have no camera; the resource still ticks and
//! is assertable in tests.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::common::state::GameState;

#[derive(Resource, Debug, Default)]
pub struct ScreenShake {
    remaining: f32,
    amplitude: f32,
    decay: f32,
    phase: f32,
    prev_offset: Vec2,
}

impl ScreenShake {
    /// Start a shake. Replaces any running shake: parameters are set, not
    /// stacked.
    pub fn trigger(&mut self, duration: f32, amplitude: f32, decay: f32) {
        self.remaining = duration.max(0.0);
        self.amplitude = amplitude;
        self.decay = decay.max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Advance the shake window and produce this frame's offset.
    ///
    /// Deterministic pseudo-noise (layered sines); no RNG needed. The window
    /// drains at `decay` speed, so a higher decay shortens the shake.
    fn advance(&mut self, dt: f32) -> Vec2 {
        if self.remaining <= 0.0 {
            return Vec2::ZERO;
        }
        self.remaining = (self.remaining - dt * self.decay).max(0.0);
        self.phase += dt;

        let x = (self.phase * 37.0 * TAU).sin() + 0.5 * (self.phase * 61.0 * TAU).sin();
        let y = (self.phase * 41.0 * TAU).cos() + 0.5 * (self.phase * 53.0 * TAU).cos();
        Vec2::new(x, y).clamp_length_max(1.0) * self.amplitude
    }
}

/// Apply the shake offset to the camera, drift-free.
pub fn apply_screen_shake(
    time: Res<Time>,
    mut shake: ResMut<ScreenShake>,
    mut q_cam: Query<&mut Transform, With<Camera2d>>,
) {
    let dt = time.delta_secs();

    // Remove last frame's offset first.
    if let Ok(mut tf) = q_cam.single_mut() {
        tf.translation.x -= shake.prev_offset.x;
        tf.translation.y -= shake.prev_offset.y;
    }
    shake.prev_offset = Vec2::ZERO;

    let offset = shake.advance(dt);
    if offset != Vec2::ZERO {
        if let Ok(mut tf) = q_cam.single_mut() {
            tf.translation.x += offset.x;
            tf.translation.y += offset.y;
            shake.prev_offset = offset;
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ScreenShake>();
    app.add_systems(
        PostUpdate,
        apply_screen_shake
            .before(TransformSystems::Propagate)
            .run_if(in_state(GameState::InGame)),
    );
}

#[cfg(test)]
mod tests;
