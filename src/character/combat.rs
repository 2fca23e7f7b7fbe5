//! Firing, damage intake, kill bookkeeping, and the respawn countdown.
//!
//! ## Damage rules
//!
//! - Damage against a character that is already dead is a **no-op**: health
//!   and the death tally stay untouched.  This also absorbs the race where a
//!   bullet lands during the respawn countdown.
//! - Death schedules exactly one respawn.  `respawn_timer` only transitions
//!   `None → Some`, so a character mid-countdown can never be rescheduled.
//! - While dead the body carries [`RigidBodyDisabled`]: the collider is off
//!   and no further bullets can intersect it.

use super::state::{
    AnimationState, Character, CharacterHealth, CombatStats, FacingAngle, FireCooldown,
    LocalPlayer, SpawnPoint,
};
use crate::config::CombatConfig;
use crate::director::{CharacterHurt, CharacterKilled, DamageInflicted, ShotFired};
use crate::input::StickState;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

// ── Firing ─────────────────────────────────────────────────────────────────────

/// Muzzle position for a shot: the configured weapon offset rotated about Y
/// by the shot heading, from the character's current translation.
fn muzzle_position(translation: Vec3, angle: f32, config: &CombatConfig) -> Vec3 {
    let local = Vec3::new(
        config.weapon_offset_x,
        config.weapon_offset_y,
        config.weapon_offset_z,
    );
    translation + Quat::from_rotation_y(angle) * local
}

/// Emit a fire event while the fire control is held, gated by the per-shot
/// cooldown.
///
/// A request arriving before the cooldown elapses is rejected outright: no
/// bullet, and the cooldown keeps its remaining time.  The shot heading is
/// the stick heading while moving, otherwise the current facing — so a
/// stationary character shoots where it faces.
pub fn fire_system(
    time: Res<Time>,
    stick: Res<StickState>,
    config: Res<CombatConfig>,
    mut shots: MessageWriter<ShotFired>,
    mut player: Query<
        (
            Entity,
            &Transform,
            &CharacterHealth,
            &FacingAngle,
            &mut FireCooldown,
        ),
        (With<Character>, With<LocalPlayer>),
    >,
) {
    let delta = time.delta_secs();
    for (entity, transform, health, facing, mut cooldown) in player.iter_mut() {
        cooldown.timer = (cooldown.timer - delta).max(0.0);

        if !health.is_alive() || !stick.fire_held {
            continue;
        }
        if cooldown.timer > 0.0 {
            continue; // fire-rate gate: rejected, timer untouched
        }
        cooldown.timer = config.fire_cooldown_secs;

        let angle = if stick.movement_active() {
            stick.sample.angle
        } else {
            facing.0
        };

        shots.write(ShotFired {
            shooter: entity,
            origin: muzzle_position(transform.translation, angle, &config),
            angle,
        });
    }
}

// ── Damage intake ──────────────────────────────────────────────────────────────

/// Apply routed damage to the addressed characters.
///
/// A lethal hit clamps health to zero, counts the death, disables the body,
/// schedules the respawn, flips the pose to `Death`, and announces the kill.
/// A surviving hit only announces the hurt.  Damage addressed to a missing
/// or already-dead character is dropped silently.
pub fn apply_damage_system(
    mut commands: Commands,
    config: Res<CombatConfig>,
    mut damage: MessageReader<DamageInflicted>,
    mut hurt: MessageWriter<CharacterHurt>,
    mut killed: MessageWriter<CharacterKilled>,
    mut characters: Query<
        (
            &mut CharacterHealth,
            &mut CombatStats,
            &mut AnimationState,
        ),
        With<Character>,
    >,
) {
    for hit in damage.read() {
        let Ok((mut health, mut stats, mut animation)) = characters.get_mut(hit.victim) else {
            continue; // stale victim id — benign
        };
        if !health.is_alive() || health.hp <= 0 {
            continue; // dead characters take no damage
        }

        health.hp -= hit.amount;

        if health.hp <= 0 {
            health.hp = 0;
            stats.deaths += 1;
            if health.respawn_timer.is_none() {
                health.respawn_timer = Some(config.respawn_delay_secs);
            }
            *animation = AnimationState::Death;
            commands.entity(hit.victim).insert(RigidBodyDisabled);
            killed.write(CharacterKilled {
                victim: hit.victim,
                attacker: hit.attacker,
            });
            info!(
                "[combat] {:?} killed by {:?} (deaths: {})",
                hit.victim, hit.attacker, stats.deaths
            );
        } else {
            hurt.write(CharacterHurt {
                character: hit.victim,
            });
        }
    }
}

/// Credit each announced kill to the attacker's tally.
///
/// An attacker that died or despawned before the message was read simply
/// receives no credit.
pub fn score_kills_system(
    mut killed: MessageReader<CharacterKilled>,
    mut characters: Query<&mut CombatStats, With<Character>>,
) {
    for kill in killed.read() {
        if let Ok(mut stats) = characters.get_mut(kill.attacker) {
            stats.kills += 1;
        }
    }
}

// ── Respawn ────────────────────────────────────────────────────────────────────

/// Count down pending respawns and revive characters whose delay elapsed.
///
/// Revival resets position to the spawn point, zeroes velocity, restores
/// full health, and re-enables the body.  The animation system flips the
/// pose back to `Idle` in the same tick.
pub fn respawn_system(
    mut commands: Commands,
    time: Res<Time>,
    mut characters: Query<
        (
            Entity,
            &mut CharacterHealth,
            &mut Transform,
            &mut Velocity,
            &SpawnPoint,
        ),
        With<Character>,
    >,
) {
    let delta = time.delta_secs();
    for (entity, mut health, mut transform, mut velocity, spawn) in characters.iter_mut() {
        let Some(ref mut timer) = health.respawn_timer else {
            continue;
        };
        *timer -= delta;
        if *timer > 0.0 {
            continue;
        }

        health.respawn_timer = None;
        health.hp = health.max_hp;
        transform.translation = spawn.0;
        *velocity = Velocity::zero();
        commands.entity(entity).remove::<RigidBodyDisabled>();
        info!("[combat] {:?} respawned", entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muzzle_offset_rotates_with_the_heading() {
        let config = CombatConfig::default();
        let origin = Vec3::new(3.0, 0.0, -2.0);

        // Heading 0: the local offset applies unrotated.
        let ahead = muzzle_position(origin, 0.0, &config);
        assert!((ahead - origin - Vec3::new(-0.2, 1.4, 0.8)).length() < 1e-5);

        // Quarter turn: local +z maps to world +x, local +x to world −z.
        let side = muzzle_position(origin, std::f32::consts::FRAC_PI_2, &config);
        assert!((side - origin - Vec3::new(0.8, 1.4, 0.2)).length() < 1e-4);
    }

    #[test]
    fn muzzle_height_is_heading_independent() {
        let config = CombatConfig::default();
        for i in 0..8 {
            let angle = std::f32::consts::TAU * i as f32 / 8.0;
            let muzzle = muzzle_position(Vec3::ZERO, angle, &config);
            assert!((muzzle.y - config.weapon_offset_y).abs() < 1e-5);
        }
    }
}
