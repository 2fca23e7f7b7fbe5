//! Character components and resources.
//!
//! All ECS components and Bevy resources that describe character state live
//! here.  Systems that mutate this state are in the sibling modules:
//! - [`super::control`] — animation-state transitions, movement, camera
//! - [`super::combat`] — firing, damage intake, kill bookkeeping, respawn

use crate::constants::{CAMERA_HEIGHT, CAMERA_TRAIL, MAX_HEALTH};
use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker component for every match participant.
#[derive(Component, Debug, Clone, Copy)]
pub struct Character;

/// Marker for the one character driven by the local input state (and
/// followed by the camera).
#[derive(Component, Debug, Clone, Copy)]
pub struct LocalPlayer;

/// Health and the death/respawn countdown.
///
/// `respawn_timer` doubles as the alive flag: `None` while alive, `Some`
/// while dead and counting down to the respawn.  This makes rescheduling
/// impossible by construction — damage handling only ever starts a timer
/// that is `None`.
#[derive(Component, Debug, Clone)]
pub struct CharacterHealth {
    /// Current hit points, clamped to `[0, max_hp]`.
    pub hp: i32,
    pub max_hp: i32,
    /// Active respawn countdown (seconds); `None` while alive.
    pub respawn_timer: Option<f32>,
}

impl Default for CharacterHealth {
    fn default() -> Self {
        Self {
            hp: MAX_HEALTH,
            max_hp: MAX_HEALTH,
            respawn_timer: None,
        }
    }
}

impl CharacterHealth {
    /// `false` from the moment of death until the respawn completes.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.respawn_timer.is_none()
    }
}

/// Kill/death tallies exposed to the HUD and scoreboard.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct CombatStats {
    pub kills: u32,
    pub deaths: u32,
}

/// Heading the character faces, in radians (see the input module for the
/// angle convention).  Owned by the controller, not the physics body — the
/// body's rotations are locked.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct FacingAngle(pub f32);

/// Pose the presentation layer should play for this character.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    IdleShoot,
    RunShoot,
    Death,
}

/// Enforces a minimum interval between consecutive shots.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct FireCooldown {
    /// Remaining cooldown in seconds; decremented each frame, clamped to 0.
    pub timer: f32,
}

/// Where this character (re)spawns.  Fixed for the whole session.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec3);

// ── Resources ──────────────────────────────────────────────────────────────────

/// The trailing follow-camera target, recomputed every tick from the local
/// player's position.  The presentation layer applies it to an actual
/// camera; the core only computes where the camera should be and look.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FollowCamera {
    /// Where the camera should sit.
    pub eye: Vec3,
    /// What it should look at.
    pub target: Vec3,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, CAMERA_HEIGHT, CAMERA_TRAIL),
            target: Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_health_is_alive_at_full_hp() {
        let health = CharacterHealth::default();
        assert!(health.is_alive());
        assert_eq!(health.hp, MAX_HEALTH);
    }

    #[test]
    fn pending_respawn_means_dead() {
        let health = CharacterHealth {
            hp: 0,
            respawn_timer: Some(1.0),
            ..Default::default()
        };
        assert!(!health.is_alive());
    }
}
