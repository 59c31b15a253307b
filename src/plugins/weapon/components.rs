use bevy::prelude::*;

use super::config::WeaponConfig;

/// The firing state machine's mutable state, one per armed actor.
#[derive(Component, Debug)]
pub struct FireController {
    pub config: WeaponConfig,
    /// Local shooting flag; other controllers read it to cancel their input.
    pub is_firing: bool,
    /// True between a successful fire and the input release.
    /// Only consulted when the weapon is single-shot.
    pub has_fired_this_press: bool,
    /// Base aim heading, radians. Written by the aim-lock pass.
    pub heading: f32,
    /// Spread offset, radians. Replaced on every shot and zeroed on release;
    /// it never accumulates across shots.
    pub spread_offset: f32,
}

impl FireController {
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            config,
            is_firing: false,
            has_fired_this_press: false,
            heading: 0.0,
            spread_offset: 0.0,
        }
    }

    /// The angle the next projectile leaves along.
    pub fn aim_angle(&self) -> f32 {
        self.heading + self.spread_offset
    }
}

/// Fire input edges, refreshed once per tick.
///
/// Edge detection is self-contained (previous-held comparison) so headless
/// apps without an input clearing pass still see correct release edges.
#[derive(Resource, Default, Debug)]
pub struct FireInput {
    pub held: bool,
    pub just_released: bool,
}
