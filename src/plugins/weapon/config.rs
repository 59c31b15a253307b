//! Weapon configuration. Fixed at construction; there is no runtime
//! reconfiguration surface.

use bevy::prelude::*;

use crate::plugins::projectiles::components::PoolKey;

#[derive(Debug, Clone)]
pub struct WeaponConfig {
    /// Pool key of the projectile to fire.
    pub projectile: PoolKey,
    /// Pool key of the muzzle flash; `None` disables the flash.
    pub muzzle_flash: Option<PoolKey>,
    /// How long to wait between input acceptance and the projectile spawn.
    pub startup_delay: f32,
    /// Cooldown before the weapon may fire again.
    pub fire_interval: f32,
    /// One shot per press instead of continuous fire.
    pub single_shot: bool,
    /// Aim spread, degrees to either side.
    pub spread_angle: f32,
    /// How hard the shot kicks the shooter back.
    pub knockback_amount: f32,
    /// When the player can act again after firing.
    pub cancel_time: f32,
    /// If true, the player may keep moving while attacking.
    pub allow_movement: bool,
    /// How long the player is locked in place when movement is not allowed.
    /// Carried in the config; recovery is driven by `cancel_time`.
    pub movement_lockout: f32,
    /// How long the screen should shake.
    pub shake_duration: f32,
    /// How hard the screen should shake.
    pub shake_amplitude: f32,
    /// How fast the shake should die down.
    pub shake_decay: f32,
    /// The input this weapon listens to.
    pub fire_button: MouseButton,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            projectile: PoolKey::Bullet,
            muzzle_flash: Some(PoolKey::MuzzleFlash),
            startup_delay: 0.0,
            fire_interval: 0.1,
            single_shot: false,
            spread_angle: 10.0,
            knockback_amount: 1.0,
            cancel_time: 0.05,
            allow_movement: true,
            movement_lockout: 0.05,
            shake_duration: 0.1,
            shake_amplitude: 1.0,
            shake_decay: 1.0,
            fire_button: MouseButton::Left,
        }
    }
}
