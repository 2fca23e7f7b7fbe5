//! Combat director: message routing and the per-tick system order.
//!
//! The ECS world, keyed by `Entity`, is the identity-keyed live collection
//! of bullets and hit effects; the systems here are the routing layer
//! between the character controller and those lifecycles:
//!
//! | Message | Producer | Consumer |
//! |---------|----------|----------|
//! | [`ShotFired`] | character fire system | [`spawn_bullets_system`] (+ audio) |
//! | [`BulletImpact`] | bullet lifetime / collision systems | [`resolve_impacts_system`] |
//! | [`DamageInflicted`] | [`resolve_impacts_system`] | character damage system |
//! | [`CharacterHurt`] / [`CharacterKilled`] | character damage system | presentation (audio, scoreboard) |
//! | [`EffectFinished`] | hit-effect advance system | [`despawn_finished_effects_system`] |
//!
//! Every insert/remove is keyed by entity id and tolerates an id that is
//! already gone — a stale event degrades to a no-op, never an error.
//!
//! [`CombatPlugin`] pins the fixed within-tick ordering: input sampling →
//! controller transition → movement/fire → bullet and effect advancement in
//! `Update`, then collision intake → impact resolution → damage → kill
//! bookkeeping → effect removal in `PostUpdate`, each set chained.  Messages
//! are written by earlier systems and read by later ones in the same frame,
//! so an emitted event is fully handled before the tick ends.

use crate::character;
use crate::config::{self, CombatConfig};
use crate::hit_effect::{self, HitEffect};
use crate::input::{self, StickState, VirtualStick};
use crate::projectile::{self, Bullet};
use bevy::prelude::*;

// ── Messages ──────────────────────────────────────────────────────────────────

/// A character fired: spawn a bullet at `origin` travelling along `angle`.
/// Doubles as the fire notification for the presentation layer.
#[derive(Message, Debug, Clone, Copy)]
pub struct ShotFired {
    pub shooter: Entity,
    pub origin: Vec3,
    pub angle: f32,
}

/// A bullet terminated — by collision (`victim` may name a character) or by
/// lifetime expiry (`victim` is `None`).  Emitted exactly once per bullet.
#[derive(Message, Debug, Clone, Copy)]
pub struct BulletImpact {
    pub bullet: Entity,
    /// The bullet's last known position; the impact burst anchors here.
    pub position: Vec3,
    /// The character the bullet terminated against, if any.
    pub victim: Option<Entity>,
}

/// Damage routed from a terminal bullet to the addressed character.
#[derive(Message, Debug, Clone, Copy)]
pub struct DamageInflicted {
    pub victim: Entity,
    pub amount: i32,
    pub attacker: Entity,
}

/// A character took a non-lethal hit (presentation: hurt audio, HUD flash).
#[derive(Message, Debug, Clone, Copy)]
pub struct CharacterHurt {
    pub character: Entity,
}

/// A character died (presentation: death audio, scoreboard).
#[derive(Message, Debug, Clone, Copy)]
pub struct CharacterKilled {
    pub victim: Entity,
    pub attacker: Entity,
}

/// A hit effect's particles have all decayed; the director may remove it.
#[derive(Message, Debug, Clone, Copy)]
pub struct EffectFinished {
    pub effect: Entity,
}

// ── Routing systems ───────────────────────────────────────────────────────────

/// Insert a bullet entity for every shot fired this tick.
pub fn spawn_bullets_system(
    mut commands: Commands,
    config: Res<CombatConfig>,
    mut shots: MessageReader<ShotFired>,
) {
    for shot in shots.read() {
        projectile::spawn_bullet(&mut commands, &config, shot);
    }
}

/// Resolve terminal bullets: remove the bullet, spawn one impact burst at
/// its last position, and forward damage when a character was struck.
///
/// An impact naming a bullet that is already gone is a no-op — the entity
/// lookup doubles as the stale-id guard.
pub fn resolve_impacts_system(
    mut commands: Commands,
    config: Res<CombatConfig>,
    mut impacts: MessageReader<BulletImpact>,
    bullets: Query<&Bullet>,
    mut damage: MessageWriter<DamageInflicted>,
) {
    for impact in impacts.read() {
        let Ok(bullet) = bullets.get(impact.bullet) else {
            continue;
        };

        commands.entity(impact.bullet).despawn();
        hit_effect::spawn_hit_effect(&mut commands, impact.position);

        if let Some(victim) = impact.victim {
            damage.write(DamageInflicted {
                victim,
                amount: config.bullet_damage,
                attacker: bullet.owner,
            });
        }
    }
}

/// Remove hit effects that reported completion.  Stale ids are no-ops.
pub fn despawn_finished_effects_system(
    mut commands: Commands,
    mut finished: MessageReader<EffectFinished>,
    effects: Query<(), With<HitEffect>>,
) {
    for done in finished.read() {
        if effects.contains(done.effect) {
            commands.entity(done.effect).despawn();
        }
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// The combat simulation core: registers every message, resource, and system
/// in the fixed per-tick order.  The hosting app supplies the physics plugin
/// (Rapier) and whatever presentation it wants on top.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatConfig>()
            .init_resource::<StickState>()
            .init_resource::<VirtualStick>()
            .init_resource::<character::FollowCamera>()
            .add_message::<ShotFired>()
            .add_message::<BulletImpact>()
            .add_message::<DamageInflicted>()
            .add_message::<CharacterHurt>()
            .add_message::<CharacterKilled>()
            .add_message::<EffectFinished>()
            .add_systems(
                Startup,
                (
                    // Load config first so the stick placement sees final values.
                    config::load_combat_config,
                    input::place_stick_system.after(config::load_combat_config),
                ),
            )
            .add_systems(
                Update,
                (
                    input::stick_resize_system,
                    input::stick_drag_system,
                    input::fire_button_system,
                    character::respawn_system,
                    character::animation_state_system,
                    character::movement_system,
                    character::fire_system,
                    spawn_bullets_system,
                    projectile::bullet_advance_system,
                    projectile::bullet_lifetime_system,
                    hit_effect::hit_effect_advance_system,
                    character::camera_follow_system,
                )
                    .chain(),
            )
            .add_systems(
                PostUpdate,
                (
                    projectile::bullet_collision_system,
                    resolve_impacts_system,
                    character::apply_damage_system,
                    character::score_kills_system,
                    despawn_finished_effects_system,
                )
                    .chain(),
            );
    }
}
