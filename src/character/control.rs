//! Animation-state transitions, stick-driven movement, and the follow camera.
//!
//! ## Transition precedence (evaluated every tick)
//!
//! 1. Not alive → `Death`; movement and fire are skipped entirely.
//! 2. Otherwise the state follows `(moving, firing)`:
//!    `RunShoot` / `IdleShoot` / `Run` / `Idle`.
//!
//! Movement converts the stick heading into a per-tick impulse on the
//! character's physics body: `(sin θ, 0, cos θ) × impulse × delta ×
//! max(SPEED_FLOOR, magnitude)` — analog speed control with a floor so any
//! deflection that survives the deadzone produces visible motion.  The
//! facing angle is only rewritten when the heading moved more than a small
//! threshold, so steady input does not churn it.

use super::state::{
    AnimationState, Character, CharacterHealth, FacingAngle, FollowCamera, LocalPlayer,
};
use crate::config::CombatConfig;
use crate::input::StickState;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Evaluate the animation state machine for every character.
///
/// Characters without input (no [`LocalPlayer`] marker) idle while alive;
/// death always wins regardless of input.
pub fn animation_state_system(
    stick: Res<StickState>,
    mut characters: Query<
        (&CharacterHealth, Option<&LocalPlayer>, &mut AnimationState),
        With<Character>,
    >,
) {
    for (health, local, mut animation) in characters.iter_mut() {
        let next = if !health.is_alive() {
            AnimationState::Death
        } else if local.is_some() {
            match (stick.movement_active(), stick.fire_held) {
                (true, true) => AnimationState::RunShoot,
                (false, true) => AnimationState::IdleShoot,
                (true, false) => AnimationState::Run,
                (false, false) => AnimationState::Idle,
            }
        } else {
            AnimationState::Idle
        };

        if *animation != next {
            *animation = next;
        }
    }
}

/// Apply the stick's heading and magnitude as a movement impulse on the
/// local player's body, and keep the facing angle in step.
pub fn movement_system(
    time: Res<Time>,
    stick: Res<StickState>,
    config: Res<CombatConfig>,
    mut player: Query<
        (&CharacterHealth, &mut FacingAngle, &mut ExternalImpulse),
        (With<Character>, With<LocalPlayer>),
    >,
) {
    let Ok((health, mut facing, mut impulse)) = player.single_mut() else {
        return;
    };

    // Clear first so releasing the stick (or dying) never leaves a stale
    // impulse driving the body.
    impulse.impulse = Vec3::ZERO;

    if !health.is_alive() || !stick.movement_active() {
        return;
    }

    let sample = stick.sample;

    // Only rewrite the facing when the heading actually changed.
    if (sample.angle - facing.0).abs() > config.facing_write_threshold_rad {
        facing.0 = sample.angle;
    }

    let multiplier = sample.magnitude.max(config.speed_floor);
    impulse.impulse = Vec3::new(sample.angle.sin(), 0.0, sample.angle.cos())
        * config.move_impulse
        * time.delta_secs()
        * multiplier;
}

/// Recompute the trailing camera target from the local player's position.
///
/// While dead the offset pulls down and in for the death view; alive it
/// trails high and behind.  The aim point sits at chest height.
pub fn camera_follow_system(
    config: Res<CombatConfig>,
    mut camera: ResMut<FollowCamera>,
    player: Query<(&Transform, &CharacterHealth), (With<Character>, With<LocalPlayer>)>,
) {
    let Ok((transform, health)) = player.single() else {
        return;
    };

    let position = transform.translation;
    let (height, trail) = if health.is_alive() {
        (config.camera_height, config.camera_trail)
    } else {
        (config.camera_dead_height, config.camera_dead_trail)
    };

    camera.eye = position + Vec3::new(0.0, height, trail);
    camera.target = position + Vec3::Y * config.camera_aim_lift;
}
