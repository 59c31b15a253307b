use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::{DeferredTasks, TaskDue, TaskKind, dispatch_due_tasks};
use crate::common::test_utils::run_system_once;

fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}

#[test]
fn task_fires_after_at_least_its_delay() {
    let mut world = World::new();
    let owner = world.spawn_empty().id();

    let mut tasks = DeferredTasks::default();
    tasks.schedule(secs(0.0), owner, TaskKind::Fire, 0.1);

    assert_eq!(tasks.pop_due(secs(0.05)), None);
    assert_eq!(tasks.pop_due(secs(0.1)), Some((owner, TaskKind::Fire)));
    assert_eq!(tasks.pop_due(secs(10.0)), None);
}

#[test]
fn tasks_pop_in_due_order_with_fifo_ties() {
    let mut world = World::new();
    let owner = world.spawn_empty().id();

    let mut tasks = DeferredTasks::default();
    tasks.schedule(secs(0.0), owner, TaskKind::CanAct, 0.2);
    tasks.schedule(secs(0.0), owner, TaskKind::Fire, 0.1);
    tasks.schedule(secs(0.0), owner, TaskKind::ResetFireTime, 0.2);

    assert_eq!(tasks.pop_due(secs(1.0)), Some((owner, TaskKind::Fire)));
    // Same due time: scheduled-first pops first.
    assert_eq!(tasks.pop_due(secs(1.0)), Some((owner, TaskKind::CanAct)));
    assert_eq!(tasks.pop_due(secs(1.0)), Some((owner, TaskKind::ResetFireTime)));
}

#[test]
fn cancel_all_drops_only_that_owners_tasks() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();

    let mut tasks = DeferredTasks::default();
    tasks.schedule(secs(0.0), a, TaskKind::Fire, 0.1);
    tasks.schedule(secs(0.0), a, TaskKind::ResetFireTime, 0.2);
    tasks.schedule(secs(0.0), b, TaskKind::Fire, 0.1);

    tasks.cancel_all(a);
    assert_eq!(tasks.pending_for(a), 0);
    assert_eq!(tasks.pending_for(b), 1);

    assert_eq!(tasks.pop_due(secs(1.0)), Some((b, TaskKind::Fire)));
    assert_eq!(tasks.pop_due(secs(1.0)), None);
}

#[test]
fn cancel_all_is_idempotent() {
    let mut world = World::new();
    let owner = world.spawn_empty().id();

    let mut tasks = DeferredTasks::default();
    tasks.cancel_all(owner);
    tasks.cancel_all(owner);
    assert_eq!(tasks.pending_for(owner), 0);
    assert_eq!(tasks.pop_due(secs(1.0)), None);
}

#[test]
fn scheduling_after_cancel_uses_a_fresh_epoch() {
    let mut world = World::new();
    let owner = world.spawn_empty().id();

    let mut tasks = DeferredTasks::default();
    tasks.schedule(secs(0.0), owner, TaskKind::Fire, 0.1);
    tasks.cancel_all(owner);
    tasks.schedule(secs(0.0), owner, TaskKind::CanAct, 0.1);

    // Only the post-cancel task survives.
    assert_eq!(tasks.pending_for(owner), 1);
    assert_eq!(tasks.pop_due(secs(1.0)), Some((owner, TaskKind::CanAct)));
    assert_eq!(tasks.pop_due(secs(1.0)), None);
}

#[test]
fn dispatch_publishes_due_tasks_as_messages() {
    let mut world = World::new();
    world.init_resource::<Messages<TaskDue>>();

    let owner = world.spawn_empty().id();

    let mut tasks = DeferredTasks::default();
    tasks.schedule(secs(0.0), owner, TaskKind::Fire, 0.05);
    tasks.schedule(secs(0.0), owner, TaskKind::CanAct, 10.0);
    world.insert_resource(tasks);

    let mut time = Time::default();
    time.advance_by(secs(0.1));
    world.insert_resource(time);

    run_system_once(&mut world, dispatch_due_tasks);

    let published: Vec<TaskDue> = world
        .resource_mut::<Messages<TaskDue>>()
        .drain()
        .collect();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].kind, TaskKind::Fire);
    assert_eq!(published[0].owner, owner);

    // The far-future task is still pending.
    assert_eq!(world.resource::<DeferredTasks>().pending_for(owner), 1);
}
