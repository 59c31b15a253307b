//! Tunable gameplay constants.
//!
//! Per-weapon behaviour lives in `WeaponConfig`; the values here are
//! cross-cutting world constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    pub dash_speed: f32,
    pub bullet_speed: f32,
    /// Converts `WeaponConfig::knockback_amount` into a velocity impulse.
    pub recoil_impulse: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            player_speed: 420.0,
            dash_speed: 900.0,
            bullet_speed: 900.0,
            recoil_impulse: 140.0,
        }
    }
}
