//! Bullet lifecycle: spawning, per-tick advancement, lifetime expiry, and
//! collision intake.
//!
//! A bullet is a small sensor ball body that carries its travel angle fixed
//! at spawn — it never tracks the shooter afterwards.  Each tick it receives
//! a forward impulse along `(sin θ, 0, cos θ)`; it terminates exactly once,
//! either when its age passes the lifetime ceiling or when the physics host
//! reports an intersection with any non-bullet body, whichever comes first.
//! Both paths emit a single [`BulletImpact`] carrying the last known
//! position; the director owns the removal and the follow-up effects.

use crate::character::Character;
use crate::config::CombatConfig;
use crate::director::{BulletImpact, ShotFired};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

// ── Component ─────────────────────────────────────────────────────────────────

/// Per-bullet state attached to each fired round.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bullet {
    /// The character that fired this bullet ("who gets the kill").
    pub owner: Entity,
    /// Travel heading in radians, fixed at spawn.
    pub angle: f32,
    /// Seconds since this bullet was spawned.
    pub age: f32,
    /// Set when the bullet's single terminal event has been emitted; any
    /// later expiry or collision for this bullet is discarded.
    pub terminal: bool,
}

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Spawn a bullet body for a fire event.
///
/// The body is a dynamic sensor ball: it reports intersections for the
/// damage logic but generates no contact forces, so a hit never shoves the
/// target.  Gravity is disabled — bullets fly level along their heading
/// until they expire or intersect something.
///
/// Collision groups:
/// - `GROUP_3` — bullets belong to this group
/// - collides with `GROUP_1` (arena) and `GROUP_2` (characters) only; the
///   filter omits `GROUP_3`, so bullet/bullet pairs never produce an event.
pub fn spawn_bullet(commands: &mut Commands, config: &CombatConfig, shot: &ShotFired) -> Entity {
    commands
        .spawn((
            Bullet {
                owner: shot.shooter,
                angle: shot.angle,
                age: 0.0,
                terminal: false,
            },
            Transform::from_translation(shot.origin + Vec3::Y * config.bullet_spawn_lift),
            RigidBody::Dynamic,
            Collider::ball(config.bullet_collider_radius),
            Velocity::zero(),
            ExternalImpulse::default(),
            GravityScale(0.0),
            Sensor,
            Ccd { enabled: true },
            CollisionGroups::new(
                bevy_rapier3d::geometry::Group::GROUP_3,
                bevy_rapier3d::geometry::Group::GROUP_1 | bevy_rapier3d::geometry::Group::GROUP_2,
            ),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Apply the per-tick forward impulse to every live bullet.
pub fn bullet_advance_system(
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut bullets: Query<(&Bullet, &mut ExternalImpulse)>,
) {
    let delta = time.delta_secs();
    for (bullet, mut impulse) in bullets.iter_mut() {
        if bullet.terminal {
            continue;
        }
        impulse.impulse =
            Vec3::new(bullet.angle.sin(), 0.0, bullet.angle.cos()) * config.bullet_speed * delta;
    }
}

/// Age bullets each tick and terminate the ones past the lifetime ceiling.
///
/// Expiry is a terminal event like any other: it reports the bullet's last
/// position (an impact burst appears mid-air) but names no victim.
pub fn bullet_lifetime_system(
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut bullets: Query<(Entity, &mut Bullet, &Transform)>,
    mut impacts: MessageWriter<BulletImpact>,
) {
    let delta = time.delta_secs();
    for (entity, mut bullet, transform) in bullets.iter_mut() {
        bullet.age += delta;
        if bullet.terminal || bullet.age < config.bullet_lifetime_secs {
            continue;
        }
        bullet.terminal = true;
        impacts.write(BulletImpact {
            bullet: entity,
            position: transform.translation,
            victim: None,
        });
    }
}

/// Convert physics intersection reports into terminal bullet events.
///
/// Matches `CollisionEvent::Started` pairs; ignores `Stopped`.  Bullet/bullet
/// pairs are skipped outright — the collision-group filter already prevents
/// them, this is the second line.  A bullet that is already terminal, or
/// that appears in several events of one batch, terminates only once.
pub fn bullet_collision_system(
    mut collision_events: MessageReader<CollisionEvent>,
    mut bullets: Query<(&mut Bullet, &Transform)>,
    characters: Query<(), With<Character>>,
    mut impacts: MessageWriter<BulletImpact>,
) {
    let mut processed: std::collections::HashSet<Entity> = Default::default();

    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };

        // Bullets never terminate against other bullets.
        if bullets.contains(e1) && bullets.contains(e2) {
            continue;
        }

        let (bullet_entity, other) = if bullets.contains(e1) {
            (e1, e2)
        } else if bullets.contains(e2) {
            (e2, e1)
        } else {
            continue;
        };

        if processed.contains(&bullet_entity) {
            continue;
        }
        processed.insert(bullet_entity);

        let Ok((mut bullet, transform)) = bullets.get_mut(bullet_entity) else {
            continue;
        };
        if bullet.terminal {
            continue; // duplicate terminal event — discard
        }
        bullet.terminal = true;

        impacts.write(BulletImpact {
            bullet: bullet_entity,
            position: transform.translation,
            victim: characters.contains(other).then_some(other),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_basis_points_along_plus_z_at_angle_zero() {
        let basis = Vec3::new(0.0_f32.sin(), 0.0, 0.0_f32.cos());
        assert!((basis - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn heading_basis_points_along_plus_x_at_quarter_turn() {
        let angle = std::f32::consts::FRAC_PI_2;
        let basis = Vec3::new(angle.sin(), 0.0, angle.cos());
        assert!((basis - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn bullet_groups_exclude_bullet_bullet_pairs() {
        use bevy_rapier3d::geometry::Group;

        let bullet_membership = Group::GROUP_3;
        let bullet_filter = Group::GROUP_1 | Group::GROUP_2;

        // A bullet's filter must not accept another bullet's membership.
        assert!(!bullet_filter.intersects(bullet_membership));
        // It must still accept characters and the arena.
        assert!(bullet_filter.intersects(Group::GROUP_2));
        assert!(bullet_filter.intersects(Group::GROUP_1));
    }
}
