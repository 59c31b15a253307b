//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::{projectiles::ProjectilesPlugin, weapon::WeaponPlugin};

pub mod core;
pub mod effects;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod targets;
pub mod tasks;
pub mod weapon;
pub mod world;

// Render-only
pub mod audio;
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    player::plugin(app);
    targets::plugin(app);
    tasks::plugin(app);
    effects::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    app.add_plugins(WeaponPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    audio::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
