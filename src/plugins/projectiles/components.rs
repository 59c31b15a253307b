use bevy::prelude::*;

/// Pool type key. Typed and resolved at compile time, no name lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoolKey {
    Bullet,
    MuzzleFlash,
}

/// Marker: this entity belongs to the pool, under the given key.
#[derive(Component, Debug, Clone, Copy)]
pub struct Pooled {
    pub key: PoolKey,
}

/// Marker for bullets: pooled instances that fly and collide.
#[derive(Component)]
pub struct Projectile;

/// Marker for muzzle flashes: pooled, purely visual, short-lived.
#[derive(Component)]
pub struct MuzzleFx;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolState {
    #[default]
    Inactive,
    /// Acquired this frame; propulsion not applied yet.
    Launching,
    Active,
    PendingReturn,
}

#[derive(Component, Deref, DerefMut)]
pub struct Lifetime(pub Timer);
