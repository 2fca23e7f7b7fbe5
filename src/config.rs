//! Runtime combat configuration loaded from `assets/combat.toml`.
//!
//! [`CombatConfig`] is a Bevy [`Resource`] that mirrors the tuneable
//! constants in [`crate::constants`].  At startup, [`load_combat_config`]
//! reads `assets/combat.toml` and overwrites the defaults with any values
//! present in the file.  Missing keys fall back to the compile-time
//! defaults, so a minimal TOML can override just the constants you care
//! about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<CombatConfig>` to any system parameter list and read
//! values with `config.move_impulse`, `config.fire_cooldown_secs`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `CombatConfig::default()`.

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable combat and input configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/combat.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // ── Character: Movement ──────────────────────────────────────────────────
    pub move_impulse: f32,
    pub speed_floor: f32,
    pub facing_write_threshold_rad: f32,
    pub character_linear_damping: f32,
    pub character_capsule_half_height: f32,
    pub character_capsule_radius: f32,

    // ── Character: Combat ────────────────────────────────────────────────────
    pub fire_cooldown_secs: f32,
    pub weapon_offset_x: f32,
    pub weapon_offset_y: f32,
    pub weapon_offset_z: f32,
    pub max_health: i32,
    pub respawn_delay_secs: f32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_speed: f32,
    pub bullet_lifetime_secs: f32,
    pub bullet_damage: i32,
    pub bullet_collider_radius: f32,
    pub bullet_spawn_lift: f32,

    // ── Virtual Stick ────────────────────────────────────────────────────────
    pub stick_radius: f32,
    pub stick_margin: f32,
    pub stick_deadzone: f32,

    // ── Camera ───────────────────────────────────────────────────────────────
    pub camera_height: f32,
    pub camera_trail: f32,
    pub camera_dead_height: f32,
    pub camera_dead_trail: f32,
    pub camera_aim_lift: f32,

    // ── Arena ────────────────────────────────────────────────────────────────
    pub arena_half_extent: f32,
    pub arena_wall_height: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            // Character: Movement
            move_impulse: MOVE_IMPULSE,
            speed_floor: SPEED_FLOOR,
            facing_write_threshold_rad: FACING_WRITE_THRESHOLD_RAD,
            character_linear_damping: CHARACTER_LINEAR_DAMPING,
            character_capsule_half_height: CHARACTER_CAPSULE_HALF_HEIGHT,
            character_capsule_radius: CHARACTER_CAPSULE_RADIUS,
            // Character: Combat
            fire_cooldown_secs: FIRE_COOLDOWN_SECS,
            weapon_offset_x: WEAPON_OFFSET_X,
            weapon_offset_y: WEAPON_OFFSET_Y,
            weapon_offset_z: WEAPON_OFFSET_Z,
            max_health: MAX_HEALTH,
            respawn_delay_secs: RESPAWN_DELAY_SECS,
            // Bullets
            bullet_speed: BULLET_SPEED,
            bullet_lifetime_secs: BULLET_LIFETIME_SECS,
            bullet_damage: BULLET_DAMAGE,
            bullet_collider_radius: BULLET_COLLIDER_RADIUS,
            bullet_spawn_lift: BULLET_SPAWN_LIFT,
            // Virtual Stick
            stick_radius: STICK_RADIUS,
            stick_margin: STICK_MARGIN,
            stick_deadzone: STICK_DEADZONE,
            // Camera
            camera_height: CAMERA_HEIGHT,
            camera_trail: CAMERA_TRAIL,
            camera_dead_height: CAMERA_DEAD_HEIGHT,
            camera_dead_trail: CAMERA_DEAD_TRAIL,
            camera_aim_lift: CAMERA_AIM_LIFT,
            // Arena
            arena_half_extent: ARENA_HALF_EXTENT,
            arena_wall_height: ARENA_WALL_HEIGHT,
        }
    }
}

/// Startup system: attempt to load `assets/combat.toml` and overwrite the
/// `CombatConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are
/// printed to stderr but do not abort the simulation.  A missing file is
/// silently ignored (defaults are already in place from `init_resource`).
pub fn load_combat_config(mut config: ResMut<CombatConfig>) {
    let path = "assets/combat.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<CombatConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("✓ Loaded combat config from {path}");
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{validate_deadzone, validate_fire_cooldown};

    #[test]
    fn defaults_mirror_constants() {
        let config = CombatConfig::default();
        assert_eq!(config.bullet_damage, BULLET_DAMAGE);
        assert_eq!(config.max_health, MAX_HEALTH);
        assert!((config.fire_cooldown_secs - FIRE_COOLDOWN_SECS).abs() < f32::EPSILON);
        assert!((config.bullet_lifetime_secs - BULLET_LIFETIME_SECS).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: CombatConfig = toml::from_str("bullet_damage = 40\n").unwrap();
        assert_eq!(config.bullet_damage, 40);
        // Everything else keeps the compiled default.
        assert_eq!(config.max_health, MAX_HEALTH);
        assert!((config.bullet_speed - BULLET_SPEED).abs() < f32::EPSILON);
    }

    #[test]
    fn default_values_pass_validation() {
        let config = CombatConfig::default();
        assert!(validate_deadzone(config.stick_deadzone).is_ok());
        assert!(validate_fire_cooldown(config.fire_cooldown_secs).is_ok());
    }
}
