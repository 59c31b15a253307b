//! Keyed instance pool.
//!
//! One free-list per `PoolKey`. Instances are pre-spawned inactive and are
//! never despawned: activation and return mutate component values only (no
//! structural toggles), so the hot path never moves entities between
//! archetypes. "Disabled" bullets collide with nothing because their
//! collision filters are empty.
//!
//! Exhaustion is a capacity decision, not an error. A bucket may grow on
//! demand when both the caller and the bucket allow it; otherwise `acquire`
//! returns `None` and the caller degrades.

use avian2d::prelude::*;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::common::layers::Layer;

use super::components::{Lifetime, MuzzleFx, PoolKey, PoolState, Pooled, Projectile};

pub const BULLET_LIFETIME_SECS: f32 = 3.0;
pub const FLASH_LIFETIME_SECS: f32 = 0.06;

#[derive(Debug)]
pub struct Bucket {
    free: Vec<Entity>,
    prespawn: usize,
    growable: bool,
    /// Instances ever spawned under this key.
    live: usize,
    /// Successful acquisitions since startup.
    acquired: usize,
}

impl Bucket {
    fn new(prespawn: usize, growable: bool) -> Self {
        Self {
            free: Vec::with_capacity(prespawn),
            prespawn,
            growable,
            live: 0,
            acquired: 0,
        }
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Successful acquisitions; doubles as the pool spy in tests.
    pub fn acquired_total(&self) -> usize {
        self.acquired
    }
}

#[derive(Resource, Debug)]
pub struct ProjectilePool {
    buckets: HashMap<PoolKey, Bucket>,
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::empty()
            .with_bucket(PoolKey::Bullet, 64, true)
            .with_bucket(PoolKey::MuzzleFlash, 8, true)
    }
}

impl ProjectilePool {
    pub fn empty() -> Self {
        Self {
            buckets: HashMap::default(),
        }
    }

    pub fn with_bucket(mut self, key: PoolKey, prespawn: usize, growable: bool) -> Self {
        self.buckets.insert(key, Bucket::new(prespawn, growable));
        self
    }

    pub fn bucket(&self, key: PoolKey) -> Option<&Bucket> {
        self.buckets.get(&key)
    }
}

#[inline]
fn active_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerBullet, [Layer::World, Layer::Target])
}

/// Empty filters: an inactive bullet collides with nothing.
#[inline]
pub(super) fn inactive_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerBullet, [] as [Layer; 0])
}

fn spawn_bullet(commands: &mut Commands) -> Entity {
    let restitution = Restitution::new(0.95).with_combine_rule(CoefficientCombine::Max);

    commands
        .spawn((
            Name::new("Bullet(Pooled)"),
            Pooled {
                key: PoolKey::Bullet,
            },
            Projectile,
            PoolState::Inactive,
            Sprite {
                color: Color::srgb(1.0, 0.85, 0.3),
                custom_size: Some(Vec2::splat(8.0)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 2.0),
            Visibility::Hidden,
            RigidBody::Dynamic,
            Collider::circle(4.0),
            inactive_bullet_layers(),
            restitution,
            Friction::ZERO,
            LinearVelocity(Vec2::ZERO),
            Lifetime(Timer::from_seconds(BULLET_LIFETIME_SECS, TimerMode::Once)),
            // Always present; inactive bullets never collide anyway.
            CollisionEventsEnabled,
        ))
        .id()
}

fn spawn_flash(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            Name::new("MuzzleFlash(Pooled)"),
            Pooled {
                key: PoolKey::MuzzleFlash,
            },
            MuzzleFx,
            PoolState::Inactive,
            Sprite {
                color: Color::srgb(1.0, 0.95, 0.6),
                custom_size: Some(Vec2::splat(14.0)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 3.0),
            Visibility::Hidden,
            Lifetime(Timer::from_seconds(FLASH_LIFETIME_SECS, TimerMode::Once)),
        ))
        .id()
}

fn spawn_for_key(commands: &mut Commands, key: PoolKey) -> Entity {
    match key {
        PoolKey::Bullet => spawn_bullet(commands),
        PoolKey::MuzzleFlash => spawn_flash(commands),
    }
}

/// Pre-spawn every bucket's instances (inactive).
pub fn init_pool(mut commands: Commands, mut pool: ResMut<ProjectilePool>) {
    let keys: Vec<PoolKey> = pool.buckets.keys().copied().collect();
    for key in keys {
        let bucket = pool
            .buckets
            .get_mut(&key)
            .expect("bucket removed during init");
        bucket.free.clear();
        bucket.live = 0;
        for _ in 0..bucket.prespawn {
            let e = spawn_for_key(&mut commands, key);
            bucket.free.push(e);
            bucket.live += 1;
        }
    }
}

/// Activate an instance of `key` at the given pose.
///
/// Pops the free list, growing the bucket when the caller and the bucket both
/// allow it. Returns `None` on exhaustion; the caller decides what degrading
/// looks like.
pub fn acquire(
    commands: &mut Commands,
    pool: &mut ProjectilePool,
    key: PoolKey,
    allow_grow: bool,
    pos: Vec2,
    angle: f32,
) -> Option<Entity> {
    let bucket = pool.buckets.get_mut(&key)?;

    let entity = match bucket.free.pop() {
        Some(e) => e,
        None if allow_grow && bucket.growable => {
            bucket.live += 1;
            spawn_for_key(commands, key)
        }
        None => {
            debug!("pool exhausted for {key:?}");
            return None;
        }
    };
    bucket.acquired += 1;

    let (state, lifetime) = match key {
        // Bullets pick up their velocity on the next launch pass.
        PoolKey::Bullet => (PoolState::Launching, BULLET_LIFETIME_SECS),
        PoolKey::MuzzleFlash => (PoolState::Active, FLASH_LIFETIME_SECS),
    };

    let mut ec = commands.entity(entity);
    ec.insert((
        Transform {
            translation: pos.extend(2.0),
            rotation: Quat::from_rotation_z(angle),
            ..default()
        },
        Visibility::Visible,
        state,
        Lifetime(Timer::from_seconds(lifetime, TimerMode::Once)),
    ));
    if key == PoolKey::Bullet {
        ec.insert(active_bullet_layers());
    }

    Some(entity)
}

/// Commit returns back into the pool.
///
/// This system owns the Inactive invariants: hidden, zero velocity, empty
/// collision filters. Centralizing these writes here prevents inconsistency.
pub fn return_to_pool_commit(
    mut pool: ResMut<ProjectilePool>,
    mut q: Query<(
        Entity,
        &Pooled,
        &mut PoolState,
        &mut Visibility,
        Option<&mut LinearVelocity>,
        Option<&mut CollisionLayers>,
    )>,
) {
    for (e, pooled, mut state, mut vis, vel, layers) in &mut q {
        if *state != PoolState::PendingReturn {
            continue;
        }

        *state = PoolState::Inactive;
        *vis = Visibility::Hidden;
        if let Some(mut vel) = vel {
            vel.0 = Vec2::ZERO;
        }
        if let Some(mut layers) = layers {
            *layers = inactive_bullet_layers();
        }

        pool.buckets
            .get_mut(&pooled.key)
            .expect("pooled entity without a bucket")
            .free
            .push(e);
    }
}
