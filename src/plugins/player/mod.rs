//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input, write PlayerInput resource; tick melee/dash windows
//! - FixedUpdate: apply velocity to the kinematic rigid body
//!
//! `ActorState` lives here: one struct of cross-controller flags on the
//! player entity, mutated by this plugin (movement, dash, melee) and by the
//! fire controller. There is no ambient singleton; whoever needs the flags
//! queries the component.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};

#[derive(Component)]
pub struct Player;

/// Shared actor flags.
///
/// Several controllers write these under the single-threaded-per-frame
/// discipline Bevy already enforces for `&mut` component access:
/// - movement reads `can_move`/`is_dashing`,
/// - the fire controller reads and writes most of the rest,
/// - dash sets `is_dashing` and flags `cancelled_firing` when it interrupts
///   an active fire hold,
/// - melee sets `is_melee_attacking` for the swing window.
#[derive(Component, Debug, Clone)]
pub struct ActorState {
    pub can_act: bool,
    pub can_move: bool,
    pub can_rotate: bool,
    /// The player is holding a fire input (shared flag, cancels other input).
    pub is_shooting: bool,
    /// False for the whole window between a shot and its cooldown elapsing.
    pub ready_to_fire: bool,
    pub is_dashing: bool,
    pub is_melee_attacking: bool,
    /// Set when a dash interrupted a fire hold; cleared on input release.
    pub cancelled_firing: bool,
}

impl Default for ActorState {
    fn default() -> Self {
        Self {
            can_act: true,
            can_move: true,
            can_rotate: false,
            is_shooting: false,
            ready_to_fire: true,
            is_dashing: false,
            is_melee_attacking: false,
            cancelled_firing: false,
        }
    }
}

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub move_axis: Vec2,
}

/// Melee swing window. `ActorState::is_melee_attacking` mirrors it.
#[derive(Component, Default)]
pub struct MeleeSwing {
    timer: Option<Timer>,
}

/// Dash window. `ActorState::is_dashing` mirrors it.
#[derive(Component, Default)]
pub struct Dash {
    timer: Option<Timer>,
}

const MELEE_SWING_SECS: f32 = 0.25;
const DASH_SECS: f32 = 0.18;

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, (gather_input, melee_action, dash_action))
        .add_systems(FixedUpdate, apply_movement);
}

pub fn spawn(mut commands: Commands) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Target]);

    commands.spawn((
        Name::new("Player"),
        Player,
        ActorState::default(),
        MeleeSwing::default(),
        Dash::default(),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(26.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        RigidBody::Kinematic,
        Collider::circle(13.0),
        layers,
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };

    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = if axis.length_squared() > 0.0 {
        axis.normalize()
    } else {
        Vec2::ZERO
    };
}

/// Start a melee swing on key press and clear the flag when the swing ends.
///
/// The fire controller treats `is_melee_attacking` as its highest-priority
/// interrupt, so this flag going up cancels any pending weapon tasks on the
/// controller's next tick.
pub fn melee_action(
    time: Res<Time>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut q: Query<(&mut MeleeSwing, &mut ActorState), With<Player>>,
) {
    let Ok((mut swing, mut actor)) = q.single_mut() else {
        return;
    };

    if let Some(timer) = swing.timer.as_mut() {
        timer.tick(time.delta());
        if timer.is_finished() {
            swing.timer = None;
            actor.is_melee_attacking = false;
        }
    }

    let wants_melee = keys
        .as_ref()
        .is_some_and(|keys| keys.just_pressed(KeyCode::KeyJ));
    if wants_melee && swing.timer.is_none() && actor.can_act {
        swing.timer = Some(Timer::from_seconds(MELEE_SWING_SECS, TimerMode::Once));
        actor.is_melee_attacking = true;
    }
}

/// Start a dash on key press and clear the flag when the dash ends.
///
/// A dash that interrupts an active fire hold raises `cancelled_firing`; the
/// fire controller's release handler is the matching recovery path.
pub fn dash_action(
    time: Res<Time>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut q: Query<(&mut Dash, &mut ActorState), With<Player>>,
) {
    let Ok((mut dash, mut actor)) = q.single_mut() else {
        return;
    };

    if let Some(timer) = dash.timer.as_mut() {
        timer.tick(time.delta());
        if timer.is_finished() {
            dash.timer = None;
            actor.is_dashing = false;
        }
    }

    let wants_dash = keys
        .as_ref()
        .is_some_and(|keys| keys.just_pressed(KeyCode::ShiftLeft));
    if wants_dash && dash.timer.is_none() && actor.can_move {
        dash.timer = Some(Timer::from_seconds(DASH_SECS, TimerMode::Once));
        actor.is_dashing = true;
        if actor.is_shooting {
            actor.cancelled_firing = true;
        }
    }
}

pub fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&ActorState, &mut LinearVelocity), With<Player>>,
) {
    let Ok((actor, mut vel)) = q_player.single_mut() else {
        return;
    };

    // The fire sequence may have locked movement (and zeroed or recoiled the
    // velocity); leave whatever it set alone.
    if !actor.can_move {
        return;
    }

    let speed = if actor.is_dashing {
        tunables.dash_speed
    } else {
        tunables.player_speed
    };
    vel.0 = input.move_axis * speed;
}

#[cfg(test)]
mod tests;
