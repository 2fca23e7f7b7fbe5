//! Third-person arena combat simulation core.
//!
//! An embeddable real-time combat loop: virtual-stick input becomes
//! character motion and rate-limited fire events, bullets advance as
//! physics bodies until they expire or intersect something, impacts resolve
//! into damage and particle bursts, and characters run a finite
//! health/death/respawn lifecycle.  Rendering, audio, and camera control
//! stay outside — the hosting app reads the exposed components, resources,
//! and messages and draws whatever it likes.

pub mod character;
pub mod config;
pub mod constants;
pub mod director;
pub mod error;
pub mod hit_effect;
pub mod input;
pub mod projectile;

pub use director::CombatPlugin;
