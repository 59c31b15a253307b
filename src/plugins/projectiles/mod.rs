//! Projectiles plugin: data-driven pooling + pooled-instance lifecycle.
//!
//! # Data flow (big picture)
//! ```text
//!   Update schedule (variable dt)
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  (A) weapon::execute_fire consumes a due Fire task                   │
//! │      - pops ProjectilePool free list (pool::acquire)                 │
//! │      - writes pose + Visibility + PoolState::Launching               │
//! │                                                                      │
//! │  (B) launch_bullets                                                  │
//! │      - Launching -> Active, velocity = barrel axis * bullet_speed    │
//! └──────────────────────────────────────────────────────────────────────┘
//!                 │
//!                 v
//!  FixedUpdate / FixedPostUpdate (fixed dt)
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  (C) tick_lifetimes: expiry -> PendingReturn                         │
//! │  (D) physics emits CollisionStart messages (Avian)                   │
//! │  (E) process_bullet_hits: Active bullet hit -> PendingReturn         │
//! │  (F) return_to_pool_commit: PendingReturn -> Inactive, push free     │
//! └──────────────────────────────────────────────────────────────────────┘
//!
//! Feedback loop:
//!   commit pushes entities back into ProjectilePool
//!   acquire pops them on the next shot
//! ```
//!
//! Correctness checks sit at boundaries: `acquire` treats exhaustion as a
//! capacity decision (`None`), while a pooled entity missing its bucket is an
//! invariant violation and fails fast.

pub mod components;
pub mod pool;
pub mod systems;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<pool::ProjectilePool>()
            .add_systems(Startup, pool::init_pool);

        app.add_systems(
            Update,
            systems::launch_bullets.run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedUpdate,
            systems::tick_lifetimes.run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            systems::process_bullet_hits
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            pool::return_to_pool_commit
                .after(systems::process_bullet_hits)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
