//! Centralised combat and input constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::CombatConfig`] mirrors most of these as a runtime-tunable
//! resource; this file remains the authoritative default source.

// ── Character: Movement ───────────────────────────────────────────────────────

/// Per-second impulse magnitude applied while the stick is deflected.
///
/// The actual per-tick impulse is `MOVE_IMPULSE × delta × speed multiplier`,
/// so the value is frame-rate independent.  Combined with the heavy linear
/// damping on the character body this produces a snappy stop-on-release feel
/// rather than ice-skating drift.
pub const MOVE_IMPULSE: f32 = 202.0;

/// Lower bound on the analog speed multiplier.
///
/// Any stick deflection that survives the deadzone moves the character at
/// least this fraction of full speed, so small deflections still produce
/// visible motion instead of imperceptible creep.
pub const SPEED_FLOOR: f32 = 0.3;

/// Minimum heading change (radians) before the facing angle is rewritten.
///
/// Filters out sub-hundredth-radian stick noise so the facing value (and any
/// mesh rotation derived from it) is not churned every tick while the stick
/// is held steady.
pub const FACING_WRITE_THRESHOLD_RAD: f32 = 0.01;

/// Linear damping on the character body.  Movement is impulse-driven every
/// tick, so damping this strong makes release-to-stop take only a few
/// frames.  Tested range: 8.0–16.0; below ~6.0 the character noticeably
/// slides after the stick is released.
pub const CHARACTER_LINEAR_DAMPING: f32 = 12.0;

/// Character capsule collider: half-height of the cylindrical section and
/// cap radius (world units).
pub const CHARACTER_CAPSULE_HALF_HEIGHT: f32 = 0.7;
pub const CHARACTER_CAPSULE_RADIUS: f32 = 0.6;

// ── Character: Combat ─────────────────────────────────────────────────────────

/// Minimum interval between consecutive shots from one character (seconds).
pub const FIRE_COOLDOWN_SECS: f32 = 0.38;

/// Muzzle offset from the character origin in its local (unrotated) frame:
/// slightly left, chest height, forward.  Rotated by the facing angle at
/// fire time.
pub const WEAPON_OFFSET_X: f32 = -0.2;
pub const WEAPON_OFFSET_Y: f32 = 1.4;
pub const WEAPON_OFFSET_Z: f32 = 0.8;

/// Health a character spawns and respawns with.
pub const MAX_HEALTH: i32 = 100;

/// Delay between death and reappearing at the spawn point (seconds).
pub const RESPAWN_DELAY_SECS: f32 = 2.0;

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Per-second forward impulse magnitude applied to a bullet each tick.
pub const BULLET_SPEED: f32 = 20.0;

/// Bullet lifetime ceiling (seconds).  A bullet that has not collided by
/// this age terminates by expiry, still producing an impact burst at its
/// final position.
pub const BULLET_LIFETIME_SECS: f32 = 3.0;

/// Damage applied when a bullet terminates against a character.
pub const BULLET_DAMAGE: i32 = 25;

/// Bullet ball-collider radius (world units).
pub const BULLET_COLLIDER_RADIUS: f32 = 0.1;

/// Vertical lift applied to the muzzle position at spawn so bullets fly at
/// roughly head height rather than out of the character's feet.
pub const BULLET_SPAWN_LIFT: f32 = 1.5;

// ── Virtual Stick ─────────────────────────────────────────────────────────────

/// Radius of the circular control surface in screen pixels.  Pointer offsets
/// are normalised by this value, so it also defines full deflection.
pub const STICK_RADIUS: f32 = 50.0;

/// Screen-edge margin used when anchoring the stick to the bottom-left
/// corner of the window.
pub const STICK_MARGIN: f32 = 24.0;

/// Deflection magnitude at or below which the stick reports the exact
/// neutral sample.  Prevents control jitter around the rest position.
/// Tested range: 0.02–0.05; 0.02 keeps small deliberate deflections alive.
pub const STICK_DEADZONE: f32 = 0.02;

// ── Hit Effects ───────────────────────────────────────────────────────────────

/// Number of particles in one impact burst.
pub const HIT_PARTICLE_COUNT: usize = 20;

/// Half-extent of the cube particles scatter within at spawn (world units).
pub const HIT_PARTICLE_SCATTER: f32 = 0.25;

/// Horizontal particle velocity half-range (units/s); vertical velocity is
/// `0..HIT_PARTICLE_UP_SPEED` so bursts fountain upward.
pub const HIT_PARTICLE_LATERAL_SPEED: f32 = 1.0;
pub const HIT_PARTICLE_UP_SPEED: f32 = 2.0;

/// Per-particle life decay per 60 Hz-reference tick, drawn uniformly from
/// `[HIT_PARTICLE_DECAY_MIN, HIT_PARTICLE_DECAY_MIN + HIT_PARTICLE_DECAY_BAND)`.
/// With life starting at 1.0 this gives bursts lasting roughly 0.3–0.8 s.
pub const HIT_PARTICLE_DECAY_MIN: f32 = 0.02;
pub const HIT_PARTICLE_DECAY_BAND: f32 = 0.03;

/// Decay rates are authored against a 60 Hz frame; multiplying by
/// `delta × DECAY_REFERENCE_HZ` keeps burst duration frame-rate independent.
pub const DECAY_REFERENCE_HZ: f32 = 60.0;

/// Grace period between the last particle dying and the effect reporting
/// completion, so removal never races the final visible frame.
pub const HIT_EFFECT_GRACE_SECS: f32 = 0.1;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Follow-camera offset from the character while alive: height above and
/// trail behind (world units).
pub const CAMERA_HEIGHT: f32 = 20.0;
pub const CAMERA_TRAIL: f32 = 16.0;

/// Follow-camera offset while dead — pulled down and in for the death view.
pub const CAMERA_DEAD_HEIGHT: f32 = 12.0;
pub const CAMERA_DEAD_TRAIL: f32 = 2.0;

/// The camera aims this far above the character origin (roughly chest
/// height) instead of at its feet.
pub const CAMERA_AIM_LIFT: f32 = 1.5;

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Half-extent of the square arena floor slab (world units).
pub const ARENA_HALF_EXTENT: f32 = 20.0;

/// Height of the boundary walls around the arena floor.
pub const ARENA_WALL_HEIGHT: f32 = 2.0;
