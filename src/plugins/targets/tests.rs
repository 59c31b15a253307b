use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;

use super::Target;

#[test]
fn spawns_static_targets() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_targets);

    let targets = world
        .query::<(&Target, &RigidBody)>()
        .iter(&world)
        .filter(|(_, rb)| matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(targets, 3);
}
