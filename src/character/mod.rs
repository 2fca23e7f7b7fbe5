//! Character module: participant entity, state machine, combat, and camera.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | ECS components (`Character`, `CharacterHealth`, `CombatStats`, `AnimationState`, `FireCooldown`) and the `FollowCamera` resource |
//! | [`control`] | Animation-state precedence, stick-driven impulse movement, follow-camera target |
//! | [`combat`] | Fire-rate-gated shooting, damage intake, kill crediting, respawn countdown |
//!
//! All public items are re-exported at this level so that the rest of the
//! crate can use flat `crate::character::*` imports without knowing the
//! sub-module layout.

pub mod combat;
pub mod control;
pub mod state;

// ── Flat re-exports ────────────────────────────────────────────────────────────

pub use combat::{apply_damage_system, fire_system, respawn_system, score_kills_system};
pub use control::{animation_state_system, camera_follow_system, movement_system};
pub use state::{
    AnimationState, Character, CharacterHealth, CombatStats, FacingAngle, FireCooldown,
    FollowCamera, LocalPlayer, SpawnPoint,
};

// ── Character spawn ────────────────────────────────────────────────────────────

use crate::config::CombatConfig;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Spawn a match participant at `spawn_point`.
///
/// The body is a dynamic capsule with rotations locked (the facing angle is
/// controller state, not physics state) and heavy linear damping so
/// impulse-driven movement stops quickly on release.
///
/// Collision groups:
/// - `GROUP_2` — characters belong to this group
/// - collides with `GROUP_1` (arena), `GROUP_2` (other characters), and
///   `GROUP_3` (bullets)
///
/// Pass `local = true` for the one character the input state and camera
/// should drive.
pub fn spawn_character(
    commands: &mut Commands,
    config: &CombatConfig,
    spawn_point: Vec3,
    local: bool,
) -> Entity {
    let entity = commands
        .spawn((
            Character,
            CharacterHealth::default(),
            CombatStats::default(),
            FacingAngle::default(),
            AnimationState::default(),
            FireCooldown::default(),
            SpawnPoint(spawn_point),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::capsule_y(
                    config.character_capsule_half_height,
                    config.character_capsule_radius,
                ),
                LockedAxes::ROTATION_LOCKED,
                Velocity::zero(),
                ExternalImpulse::default(),
                Damping {
                    linear_damping: config.character_linear_damping,
                    angular_damping: 0.0,
                },
                CollisionGroups::new(
                    bevy_rapier3d::geometry::Group::GROUP_2,
                    bevy_rapier3d::geometry::Group::GROUP_1
                        | bevy_rapier3d::geometry::Group::GROUP_2
                        | bevy_rapier3d::geometry::Group::GROUP_3,
                ),
                ActiveEvents::COLLISION_EVENTS,
            ),
            // Transform
            Transform::from_translation(spawn_point),
        ))
        .id();

    if local {
        commands.entity(entity).insert(LocalPlayer);
    }

    info!("✓ Character spawned at {spawn_point} (local: {local})");
    entity
}
