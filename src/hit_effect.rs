//! Impact particle bursts spawned where a bullet terminates.
//!
//! ## Design
//!
//! A [`HitEffect`] is one ECS entity anchored at the impact position, owning
//! a fixed-size set of simulated particles.  The particle state (relative
//! position, velocity, remaining life, decay rate) lives entirely in the
//! component; the presentation layer reads it out each frame and treats each
//! particle's `life` as its opacity.  No rendering happens here.
//!
//! The whole lifecycle is driven by the pure [`HitEffect::advance`] method:
//! particles drift by their velocity, lose life at their own decay rate
//! (normalised to a 60 Hz reference so burst duration is frame-rate
//! independent), and are dropped — never revived — once life reaches zero.
//! When the set empties, a short grace countdown runs before the effect
//! reports completion, so removal never races the final visible frame.
//! [`hit_effect_advance_system`] wraps `advance` and emits
//! [`EffectFinished`](crate::director::EffectFinished) for the director to
//! act on.

use crate::constants::{
    DECAY_REFERENCE_HZ, HIT_EFFECT_GRACE_SECS, HIT_PARTICLE_COUNT, HIT_PARTICLE_DECAY_BAND,
    HIT_PARTICLE_DECAY_MIN, HIT_PARTICLE_LATERAL_SPEED, HIT_PARTICLE_SCATTER,
    HIT_PARTICLE_UP_SPEED,
};
use crate::director::EffectFinished;
use bevy::prelude::*;
use rand::Rng;

// ── Component ─────────────────────────────────────────────────────────────────

/// One simulated spark in an impact burst.
#[derive(Debug, Clone, Copy)]
pub struct HitParticle {
    /// Position relative to the effect anchor (world units).
    pub offset: Vec3,
    /// World-space velocity (units/s).
    pub velocity: Vec3,
    /// Remaining life in (0, 1]; doubles as presentation opacity.
    pub life: f32,
    /// Life lost per 60 Hz-reference tick.
    pub decay: f32,
}

/// A short-lived burst of particles at a bullet's terminal position.
///
/// Never mutated externally once spawned; [`advance`](Self::advance) is the
/// only state transition.
#[derive(Component, Debug, Clone)]
pub struct HitEffect {
    /// Particles still alive.  Strictly shrinks over time.
    pub particles: Vec<HitParticle>,
    /// Grace countdown, started once the last particle dies.
    grace: f32,
}

impl HitEffect {
    /// Build a fresh burst: `HIT_PARTICLE_COUNT` particles with randomized
    /// offsets inside a small cube, outward/upward velocities, full life,
    /// and a decay rate drawn from the configured band.
    pub fn scatter(rng: &mut impl Rng) -> Self {
        let particles = (0..HIT_PARTICLE_COUNT)
            .map(|_| HitParticle {
                offset: Vec3::new(
                    rng.gen_range(-HIT_PARTICLE_SCATTER..HIT_PARTICLE_SCATTER),
                    rng.gen_range(-HIT_PARTICLE_SCATTER..HIT_PARTICLE_SCATTER),
                    rng.gen_range(-HIT_PARTICLE_SCATTER..HIT_PARTICLE_SCATTER),
                ),
                velocity: Vec3::new(
                    rng.gen_range(-HIT_PARTICLE_LATERAL_SPEED..HIT_PARTICLE_LATERAL_SPEED),
                    rng.gen_range(0.0..HIT_PARTICLE_UP_SPEED),
                    rng.gen_range(-HIT_PARTICLE_LATERAL_SPEED..HIT_PARTICLE_LATERAL_SPEED),
                ),
                life: 1.0,
                decay: rng
                    .gen_range(HIT_PARTICLE_DECAY_MIN..HIT_PARTICLE_DECAY_MIN + HIT_PARTICLE_DECAY_BAND),
            })
            .collect();

        Self {
            particles,
            grace: HIT_EFFECT_GRACE_SECS,
        }
    }

    /// Advance the burst by `delta` seconds.
    ///
    /// Moves every particle, subtracts `decay × delta × 60 Hz` from its life,
    /// and drops particles whose life reached zero.  Once the set is empty
    /// the grace countdown ticks; returns `true` when the effect has fully
    /// finished.  Calling `advance` on a spent effect stays spent — nothing
    /// ever re-grows.
    pub fn advance(&mut self, delta: f32) -> bool {
        for particle in &mut self.particles {
            particle.offset += particle.velocity * delta;
            particle.life -= particle.decay * delta * DECAY_REFERENCE_HZ;
        }
        self.particles.retain(|particle| particle.life > 0.0);

        if self.particles.is_empty() {
            self.grace -= delta;
        }
        self.is_spent()
    }

    /// Whether every particle has decayed and the grace period has elapsed.
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.particles.is_empty() && self.grace <= 0.0
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Spawn a burst entity anchored at `position`.
pub fn spawn_hit_effect(commands: &mut Commands, position: Vec3) -> Entity {
    let mut rng = rand::thread_rng();
    commands
        .spawn((
            HitEffect::scatter(&mut rng),
            Transform::from_translation(position),
        ))
        .id()
}

/// Advance every live burst and report the ones that finished this tick.
///
/// Removal itself is the director's job; this system only self-reports via
/// [`EffectFinished`].
pub fn hit_effect_advance_system(
    time: Res<Time>,
    mut effects: Query<(Entity, &mut HitEffect)>,
    mut finished: MessageWriter<EffectFinished>,
) {
    let delta = time.delta_secs();
    for (entity, mut effect) in effects.iter_mut() {
        if effect.advance(delta) {
            finished.write(EffectFinished { effect: entity });
        }
    }
}
