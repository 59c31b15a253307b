//! Deferred task scheduling.
//!
//! The weapon sequence never blocks: "wait `startup_delay`, then fire" is
//! expressed by pushing a typed task into a min-heap keyed by its due time.
//! A dispatch system drains due tasks at the tick boundary and republishes
//! them as buffered `TaskDue` messages; consumers run after it in the same
//! `Update` schedule, so a task never executes concurrently with the
//! controller tick.
//!
//! Cancellation is deliberately coarse: `cancel_all(owner)` is the only
//! granularity. Each owner has an epoch counter; scheduling stamps the task
//! with the owner's current epoch and cancelling bumps it. Stale entries stay
//! in the heap and are dropped when they surface; that is cheaper than rebuilding
//! the heap, and `cancel_all` stays O(1).

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use bevy::ecs::message::{MessageWriter, Messages};
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::common::state::GameState;

/// The callbacks a weapon can defer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// Spawn the projectile and apply every side effect of the shot.
    Fire,
    /// End of the weapon cooldown.
    ResetFireTime,
    /// End of the post-shot action lockout.
    CanAct,
}

/// A deferred task becomes one of these once its delay has elapsed.
#[derive(Message, Clone, Copy, Debug)]
pub struct TaskDue {
    pub owner: Entity,
    pub kind: TaskKind,
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    /// FIFO tie-break for tasks due at the same instant.
    seq: u64,
    owner: Entity,
    epoch: u32,
    kind: TaskKind,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed: BinaryHeap is a max-heap, we want the earliest due time on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending deferred tasks, all owners mixed in one heap.
#[derive(Resource, Default)]
pub struct DeferredTasks {
    queue: BinaryHeap<Scheduled>,
    epochs: HashMap<Entity, u32>,
    next_seq: u64,
}

impl DeferredTasks {
    /// Schedule `kind` for `owner`, to run once after at least `delay` seconds
    /// past `now` on the frame clock.
    pub fn schedule(&mut self, now: Duration, owner: Entity, kind: TaskKind, delay: f32) {
        let due = now + Duration::from_secs_f32(delay.max(0.0));
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due,
            seq,
            owner,
            epoch: self.epoch_of(owner),
            kind,
        });
    }

    /// Cancel every pending task of `owner`. Idempotent when none are pending.
    pub fn cancel_all(&mut self, owner: Entity) {
        *self.epochs.entry(owner).or_insert(0) += 1;
    }

    /// Number of live (not cancelled) pending tasks for `owner`.
    pub fn pending_for(&self, owner: Entity) -> usize {
        let epoch = self.epoch_of(owner);
        self.queue
            .iter()
            .filter(|t| t.owner == owner && t.epoch == epoch)
            .count()
    }

    fn epoch_of(&self, owner: Entity) -> u32 {
        self.epochs.get(&owner).copied().unwrap_or(0)
    }

    /// Pop the next live task due at or before `now`, dropping cancelled
    /// entries as they surface.
    fn pop_due(&mut self, now: Duration) -> Option<(Entity, TaskKind)> {
        loop {
            if self.queue.peek().is_none_or(|head| head.due > now) {
                return None;
            }
            let Some(task) = self.queue.pop() else {
                return None;
            };
            if task.epoch == self.epoch_of(task.owner) {
                return Some((task.owner, task.kind));
            }
            debug!("dropping cancelled {:?} task for {:?}", task.kind, task.owner);
        }
    }
}

/// Drain due tasks into `TaskDue` messages.
///
/// Runs before every task consumer, so a task scheduled with zero delay is
/// picked up on the next tick, never within the tick that scheduled it.
pub fn dispatch_due_tasks(
    time: Res<Time>,
    mut tasks: ResMut<DeferredTasks>,
    mut due: MessageWriter<TaskDue>,
) {
    let now = time.elapsed();
    while let Some((owner, kind)) = tasks.pop_due(now) {
        due.write(TaskDue { owner, kind });
    }
}

/// Maintain the message buffer (double-buffered; `update()` advances it).
fn update_task_messages(mut msgs: ResMut<Messages<TaskDue>>) {
    msgs.update();
}

pub fn plugin(app: &mut App) {
    app.init_resource::<DeferredTasks>();
    app.init_resource::<Messages<TaskDue>>();
    app.add_systems(
        Update,
        dispatch_due_tasks.run_if(in_state(GameState::InGame)),
    );
    app.add_systems(PostUpdate, update_task_messages);
}

#[cfg(test)]
mod tests;
