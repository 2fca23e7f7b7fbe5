//! Combat-simulation error types.
//!
//! Every error in this core is recoverable: malformed input clamps to
//! neutral, events addressed to removed entities degrade to no-ops, and a
//! duplicate terminal event is discarded.  These types give the recovery
//! sites a shared vocabulary (and let configuration validation reject
//! out-of-range values before a session starts); nothing here ever aborts
//! the simulation loop.

// This module provides infrastructure types for error reporting and config
// validation.  Items are public API; dead_code lint is suppressed to avoid
// forcing premature wiring.
#![allow(dead_code)]
use std::fmt;

/// Top-level error enum for the combat simulation.
#[derive(Debug)]
pub enum CombatError {
    /// A pointer sample carried coordinates outside the expected numeric
    /// domain (NaN / infinite).  Recovered locally by emitting the neutral
    /// stick sample.
    InvalidStickSample {
        /// Raw pointer x as received.
        x: f32,
        /// Raw pointer y as received.
        y: f32,
    },

    /// An event named a character, bullet, or hit-effect entity that is no
    /// longer tracked.  Usually a despawn race between the lifetime system
    /// and the collision intake; handled as a benign no-op.
    StaleEntity {
        /// Human-readable description of where the lookup occurred.
        context: &'static str,
    },

    /// A second terminal event arrived for an already-terminated bullet.
    /// Must be discarded to prevent double damage or a duplicate impact
    /// burst.
    DoubleTerminal {
        /// Which handler observed the duplicate.
        context: &'static str,
    },

    /// Combat constant is outside its safe operating range.
    /// Returned by validation helpers; not triggered at runtime by default.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for CombatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatError::InvalidStickSample { x, y } => write!(
                f,
                "stick sample ({}, {}) outside the expected numeric domain; clamped to neutral",
                x, y
            ),
            CombatError::StaleEntity { context } => {
                write!(f, "entity not found during '{}'", context)
            }
            CombatError::DoubleTerminal { context } => {
                write!(f, "duplicate terminal event discarded in '{}'", context)
            }
            CombatError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for CombatError {}

/// Convenience alias: a `Result` using `CombatError` as the error type.
pub type CombatResult<T> = Result<T, CombatError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if `deadzone` is outside its validated safe range.
///
/// At 0.0 every rest-position jitter registers as movement; at 0.5 and above
/// half the stick throw is dead and analog control degrades to a button.
pub fn validate_deadzone(value: f32) -> CombatResult<()> {
    if !(0.0..0.5).contains(&value) {
        Err(CombatError::UnsafeConstant {
            name: "STICK_DEADZONE",
            value,
            safe_range: "[0.0, 0.5)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `cooldown` is not strictly positive.
///
/// A zero or negative fire cooldown removes the rate gate entirely and lets
/// one held button spawn a bullet every tick.
pub fn validate_fire_cooldown(value: f32) -> CombatResult<()> {
    if value <= 0.0 {
        Err(CombatError::UnsafeConstant {
            name: "FIRE_COOLDOWN_SECS",
            value,
            safe_range: "(0.0, ∞)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `lifetime` is not strictly positive.
pub fn validate_bullet_lifetime(value: f32) -> CombatResult<()> {
    if value <= 0.0 {
        Err(CombatError::UnsafeConstant {
            name: "BULLET_LIFETIME_SECS",
            value,
            safe_range: "(0.0, ∞)",
        })
    } else {
        Ok(())
    }
}
