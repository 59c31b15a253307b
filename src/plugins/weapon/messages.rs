//! Buffered fire-and-forget requests produced by the fire sequence.
//!
//! Producers enqueue intent; the consumers run later in the same frame. None
//! of these carries a result back; a request that finds nothing to act on is
//! dropped.

use bevy::prelude::*;

/// Ask the aim-lock pass to snap the shooter toward its target.
#[derive(Message, Clone, Copy, Debug)]
pub struct AimSnapRequest {
    pub shooter: Entity,
}

/// A projectile actually left the barrel; drives the audio cue.
#[derive(Message, Clone, Copy, Debug)]
pub struct ShotCue {
    pub shooter: Entity,
}
