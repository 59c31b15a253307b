mod common;

use bevy::prelude::*;
use gunplay::plugins::projectiles::components::PoolKey;
use gunplay::plugins::projectiles::pool::ProjectilePool;
use gunplay::plugins::weapon::components::FireController;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn pool_is_prespawned_at_startup() {
    let mut app = common::app_headless();
    app.update();

    let pool = app.world().resource::<ProjectilePool>();
    assert!(pool.bucket(PoolKey::Bullet).unwrap().free_count() > 0);
    assert!(pool.bucket(PoolKey::MuzzleFlash).unwrap().free_count() > 0);
}

#[test]
fn player_spawns_armed() {
    let mut app = common::app_headless();

    // Frame 1 spawns the player, frame 2 applies the arming command.
    app.update();
    app.update();

    let armed = app
        .world_mut()
        .query::<&FireController>()
        .iter(app.world())
        .next()
        .is_some();
    assert!(armed, "player should carry a FireController");
}
