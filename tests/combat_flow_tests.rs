//! Headless end-to-end tests for the combat loop.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering, no physics
//! stepping — so they run fast and deterministically in CI.  Collision
//! reports are injected as synthetic `CollisionEvent` messages, and the
//! stick/fire input is driven by writing [`StickState`] directly, which is
//! exactly what that resource exists for.
//!
//! Covered flows:
//! 1. Fire → one bullet carrying the shooter's heading; rapid re-fire is
//!    rejected by the rate gate.
//! 2. Bullet expiry → impact burst, no damage.
//! 3. Bullet/character collision → bullet removed, exactly one burst,
//!    exactly one 25-damage application.
//! 4. Bullet/bullet contact → ignored entirely.
//! 5. Lethal hit → death bookkeeping, disabled body, scheduled respawn, and
//!    the eventual revival at the spawn point.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use skirmish::character::{
    self, AnimationState, Character, CharacterHealth, CombatStats, FacingAngle, FireCooldown,
    FollowCamera, LocalPlayer, SpawnPoint,
};
use skirmish::config::CombatConfig;
use skirmish::director::{
    self, BulletImpact, CharacterHurt, CharacterKilled, DamageInflicted, EffectFinished,
    ShotFired,
};
use skirmish::hit_effect::{self, HitEffect};
use skirmish::input::{StickSample, StickState};
use skirmish::projectile::{self, Bullet};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app with the combat systems in their production
/// order.  Input systems are left out; tests drive [`StickState`] directly.
fn combat_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_message::<CollisionEvent>();
    app.add_message::<ShotFired>();
    app.add_message::<BulletImpact>();
    app.add_message::<DamageInflicted>();
    app.add_message::<CharacterHurt>();
    app.add_message::<CharacterKilled>();
    app.add_message::<EffectFinished>();
    app.insert_resource(CombatConfig::default());
    app.init_resource::<StickState>();
    app.init_resource::<FollowCamera>();
    app.add_systems(
        Update,
        (
            character::respawn_system,
            character::animation_state_system,
            character::movement_system,
            character::fire_system,
            director::spawn_bullets_system,
            projectile::bullet_advance_system,
            projectile::bullet_lifetime_system,
            hit_effect::hit_effect_advance_system,
            character::camera_follow_system,
        )
            .chain(),
    );
    app.add_systems(
        PostUpdate,
        (
            projectile::bullet_collision_system,
            director::resolve_impacts_system,
            character::apply_damage_system,
            character::score_kills_system,
            director::despawn_finished_effects_system,
        )
            .chain(),
    );
    app
}

/// Spawn a character with the components the combat systems read.
fn spawn_character(app: &mut App, hp: i32, facing: f32, local: bool) -> Entity {
    let entity = app
        .world_mut()
        .spawn((
            Character,
            CharacterHealth {
                hp,
                max_hp: 100,
                respawn_timer: None,
            },
            CombatStats::default(),
            FacingAngle(facing),
            AnimationState::default(),
            FireCooldown::default(),
            SpawnPoint(Vec3::ZERO),
            Transform::default(),
            Velocity::zero(),
            ExternalImpulse::default(),
        ))
        .id();
    if local {
        app.world_mut().entity_mut(entity).insert(LocalPlayer);
    }
    entity
}

/// Spawn a bullet directly (bypassing the fire pipeline) for collision tests.
fn spawn_bullet(app: &mut App, owner: Entity, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Bullet {
                owner,
                angle: 0.0,
                age: 0.0,
                terminal: false,
            },
            Transform::from_translation(position),
            ExternalImpulse::default(),
        ))
        .id()
}

fn press_fire(app: &mut App) {
    app.world_mut().resource_mut::<StickState>().press_fire();
}

fn collide(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionEvent::Started(
        a,
        b,
        bevy_rapier3d::rapier::geometry::CollisionEventFlags::empty(),
    ));
}

fn bullet_count(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, With<Bullet>>()
        .iter(app.world())
        .count()
}

fn effect_count(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, With<HitEffect>>()
        .iter(app.world())
        .count()
}

// ── Firing ────────────────────────────────────────────────────────────────────

/// A stationary character fires along its facing angle; the spawned bullet
/// carries that exact heading and the shooter's identity.
#[test]
fn fire_spawns_one_bullet_with_the_shooters_heading() {
    let mut app = combat_app();
    let shooter = spawn_character(&mut app, 100, 0.7, true);
    press_fire(&mut app);

    app.update();

    let world = app.world_mut();
    let bullets: Vec<(Entity, Bullet)> = world
        .query::<(Entity, &Bullet)>()
        .iter(world)
        .map(|(e, b)| (e, *b))
        .collect();
    assert_eq!(bullets.len(), 1, "exactly one bullet per fire event");
    let (_, bullet) = bullets[0];
    assert_eq!(bullet.owner, shooter);
    assert!((bullet.angle - 0.7).abs() < 1e-6);
    assert!(!bullet.terminal);
}

/// The bullet spawns at the rotated muzzle offset plus the vertical lift.
#[test]
fn fired_bullet_spawns_lifted_above_the_muzzle() {
    let mut app = combat_app();
    spawn_character(&mut app, 100, 0.0, true);
    press_fire(&mut app);

    app.update();

    let config = CombatConfig::default();
    let world = app.world_mut();
    let transform = world
        .query_filtered::<&Transform, With<Bullet>>()
        .single(world)
        .unwrap();
    let expected_y = config.weapon_offset_y + config.bullet_spawn_lift;
    assert!((transform.translation.y - expected_y).abs() < 1e-5);
    assert!((transform.translation.z - config.weapon_offset_z).abs() < 1e-5);
}

/// A second fire request inside the cooldown window is rejected: no second
/// bullet appears.
#[test]
fn fire_rate_gate_rejects_rapid_second_shot() {
    let mut app = combat_app();
    spawn_character(&mut app, 100, 0.0, true);
    press_fire(&mut app);

    app.update();
    assert_eq!(bullet_count(&mut app), 1);

    // Fire stays held; the next frames arrive long before 380 ms elapse.
    app.update();
    app.update();
    assert_eq!(bullet_count(&mut app), 1, "cooldown must reject the re-fire");
}

/// Dead characters cannot fire.
#[test]
fn dead_character_cannot_fire() {
    let mut app = combat_app();
    let shooter = spawn_character(&mut app, 100, 0.0, true);
    app.world_mut()
        .get_mut::<CharacterHealth>(shooter)
        .unwrap()
        .respawn_timer = Some(10.0);
    press_fire(&mut app);

    app.update();
    assert_eq!(bullet_count(&mut app), 0);
}

/// While moving, the shot heading follows the stick, not the stale facing.
#[test]
fn moving_fire_uses_the_stick_heading() {
    let mut app = combat_app();
    spawn_character(&mut app, 100, 0.0, true);
    {
        let mut stick = app.world_mut().resource_mut::<StickState>();
        stick.sample = StickSample {
            x: 1.0,
            y: 0.0,
            angle: std::f32::consts::FRAC_PI_2,
            magnitude: 1.0,
        };
        stick.press_fire();
    }

    app.update();

    let world = app.world_mut();
    let bullet = world.query::<&Bullet>().single(world).unwrap();
    assert!((bullet.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
}

// ── Expiry ────────────────────────────────────────────────────────────────────

/// A bullet past its lifetime terminates with an impact burst but no damage.
#[test]
fn expired_bullet_leaves_a_burst_and_no_damage() {
    let mut app = combat_app();
    let shooter = spawn_character(&mut app, 100, 0.0, true);
    let bystander = spawn_character(&mut app, 100, 0.0, false);
    let bullet = spawn_bullet(&mut app, shooter, Vec3::new(0.0, 1.5, 4.0));

    app.world_mut().get_mut::<Bullet>(bullet).unwrap().age =
        CombatConfig::default().bullet_lifetime_secs + 0.1;

    app.update();

    assert_eq!(bullet_count(&mut app), 0, "expired bullet is removed");
    assert_eq!(effect_count(&mut app), 1, "expiry still spawns one burst");
    for entity in [shooter, bystander] {
        let health = app.world().get::<CharacterHealth>(entity).unwrap();
        assert_eq!(health.hp, 100, "expiry carries no damage payload");
    }
}

/// A bullet younger than its lifetime keeps flying.
#[test]
fn young_bullet_does_not_expire() {
    let mut app = combat_app();
    let shooter = spawn_character(&mut app, 100, 0.0, true);
    spawn_bullet(&mut app, shooter, Vec3::new(0.0, 1.5, 4.0));

    app.update();
    app.update();

    assert_eq!(bullet_count(&mut app), 1);
    assert_eq!(effect_count(&mut app), 0);
}

// ── Collision → damage ────────────────────────────────────────────────────────

/// The canonical hit: bullet collides with a character, the director removes
/// the bullet, spawns exactly one burst at its position, and delivers exactly
/// one 25-damage application.
#[test]
fn character_hit_deals_exactly_one_damage_packet() {
    let mut app = combat_app();
    let shooter = spawn_character(&mut app, 100, 0.0, true);
    let victim = spawn_character(&mut app, 100, 0.0, false);
    let bullet = spawn_bullet(&mut app, shooter, Vec3::new(0.0, 1.5, 6.0));

    collide(&mut app, bullet, victim);
    app.update();

    assert_eq!(bullet_count(&mut app), 0);
    assert_eq!(effect_count(&mut app), 1);
    let health = app.world().get::<CharacterHealth>(victim).unwrap();
    assert_eq!(health.hp, 75);
    assert!(health.is_alive());
    // The shooter is untouched and uncredited (no kill happened).
    let shooter_stats = app.world().get::<CombatStats>(shooter).unwrap();
    assert_eq!(shooter_stats.kills, 0);
}

/// Duplicate collision reports for one bullet collapse into a single
/// terminal event: one burst, one damage application.
#[test]
fn duplicate_collision_reports_do_not_double_damage() {
    let mut app = combat_app();
    let shooter = spawn_character(&mut app, 100, 0.0, true);
    let victim = spawn_character(&mut app, 100, 0.0, false);
    let bullet = spawn_bullet(&mut app, shooter, Vec3::new(0.0, 1.5, 6.0));

    collide(&mut app, bullet, victim);
    collide(&mut app, bullet, victim);
    app.update();

    assert_eq!(effect_count(&mut app), 1);
    let health = app.world().get::<CharacterHealth>(victim).unwrap();
    assert_eq!(health.hp, 75, "second report must be discarded");
}

/// Bullets pass through each other: a bullet/bullet pair is no terminal
/// event for either.
#[test]
fn bullet_bullet_contact_is_ignored() {
    let mut app = combat_app();
    let shooter = spawn_character(&mut app, 100, 0.0, true);
    let first = spawn_bullet(&mut app, shooter, Vec3::new(0.0, 1.5, 2.0));
    let second = spawn_bullet(&mut app, shooter, Vec3::new(0.0, 1.5, 2.1));

    collide(&mut app, first, second);
    app.update();

    assert_eq!(bullet_count(&mut app), 2, "both bullets keep flying");
    assert_eq!(effect_count(&mut app), 0);
    assert!(!app.world().get::<Bullet>(first).unwrap().terminal);
    assert!(!app.world().get::<Bullet>(second).unwrap().terminal);
}

/// A collision against a non-character body (arena) terminates the bullet
/// with a burst but no damage.
#[test]
fn wall_hit_terminates_without_damage() {
    let mut app = combat_app();
    let shooter = spawn_character(&mut app, 100, 0.0, true);
    let bullet = spawn_bullet(&mut app, shooter, Vec3::new(0.0, 1.5, 6.0));
    let wall = app.world_mut().spawn(Transform::default()).id();

    collide(&mut app, bullet, wall);
    app.update();

    assert_eq!(bullet_count(&mut app), 0);
    assert_eq!(effect_count(&mut app), 1);
    let health = app.world().get::<CharacterHealth>(shooter).unwrap();
    assert_eq!(health.hp, 100);
}

// ── Death and respawn ─────────────────────────────────────────────────────────

/// Survivable damage: 30 hp − 25 → 5 hp, still alive, deaths unchanged.
#[test]
fn survivable_damage_leaves_character_alive() {
    let mut app = combat_app();
    let attacker = spawn_character(&mut app, 100, 0.0, true);
    let victim = spawn_character(&mut app, 30, 0.0, false);

    app.world_mut().write_message(DamageInflicted {
        victim,
        amount: 25,
        attacker,
    });
    app.update();

    let health = app.world().get::<CharacterHealth>(victim).unwrap();
    assert_eq!(health.hp, 5);
    assert!(health.is_alive());
    assert_eq!(app.world().get::<CombatStats>(victim).unwrap().deaths, 0);
}

/// Lethal damage: 20 hp − 25 → clamped to 0, dead, one death counted, the
/// body disabled, the kill credited, and a respawn scheduled exactly once.
#[test]
fn lethal_hit_kills_and_schedules_one_respawn() {
    let mut app = combat_app();
    let attacker = spawn_character(&mut app, 100, 0.0, true);
    let victim = spawn_character(&mut app, 20, 0.0, false);
    let bullet = spawn_bullet(&mut app, attacker, Vec3::new(0.0, 1.5, 6.0));

    collide(&mut app, bullet, victim);
    app.update();

    let health = app.world().get::<CharacterHealth>(victim).unwrap();
    assert_eq!(health.hp, 0, "health clamps to zero, never negative");
    assert!(!health.is_alive());
    assert!(health.respawn_timer.is_some());
    assert_eq!(app.world().get::<CombatStats>(victim).unwrap().deaths, 1);
    assert_eq!(app.world().get::<CombatStats>(attacker).unwrap().kills, 1);
    assert_eq!(
        *app.world().get::<AnimationState>(victim).unwrap(),
        AnimationState::Death
    );
    assert!(
        app.world().get::<RigidBodyDisabled>(victim).is_some(),
        "dead characters cannot collide"
    );
}

/// Damage while dead is a no-op: health and deaths stay untouched, and the
/// pending respawn is not rescheduled.
#[test]
fn damage_while_dead_is_a_no_op() {
    let mut app = combat_app();
    let attacker = spawn_character(&mut app, 100, 0.0, true);
    let victim = spawn_character(&mut app, 20, 0.0, false);

    app.world_mut().write_message(DamageInflicted {
        victim,
        amount: 25,
        attacker,
    });
    app.update();
    let timer_after_death = app
        .world()
        .get::<CharacterHealth>(victim)
        .unwrap()
        .respawn_timer;
    assert!(timer_after_death.is_some());

    app.world_mut().write_message(DamageInflicted {
        victim,
        amount: 25,
        attacker,
    });
    app.update();

    let health = app.world().get::<CharacterHealth>(victim).unwrap();
    assert_eq!(health.hp, 0);
    assert_eq!(app.world().get::<CombatStats>(victim).unwrap().deaths, 1);
    assert_eq!(
        app.world().get::<CombatStats>(attacker).unwrap().kills,
        1,
        "no double credit for hitting a corpse"
    );
}

/// After the respawn delay the character returns at the spawn point with
/// full health and an enabled body.
#[test]
fn respawn_restores_health_position_and_body() {
    let mut app = combat_app();
    let victim = spawn_character(&mut app, 20, 0.0, false);

    // Put the character somewhere else and kill it, then force the
    // countdown to its final tick.
    app.world_mut().get_mut::<Transform>(victim).unwrap().translation = Vec3::new(5.0, 0.0, -3.0);
    {
        let mut health = app.world_mut().get_mut::<CharacterHealth>(victim).unwrap();
        health.hp = 0;
        health.respawn_timer = Some(0.0);
    }
    app.world_mut().entity_mut(victim).insert(RigidBodyDisabled);

    app.update();

    let health = app.world().get::<CharacterHealth>(victim).unwrap();
    assert!(health.is_alive());
    assert_eq!(health.hp, 100);
    let transform = app.world().get::<Transform>(victim).unwrap();
    assert_eq!(transform.translation, Vec3::ZERO, "back at the spawn point");
    assert!(app.world().get::<RigidBodyDisabled>(victim).is_none());
    assert_eq!(
        *app.world().get::<AnimationState>(victim).unwrap(),
        AnimationState::Idle,
        "pose leaves Death in the revival tick"
    );
}

// ── State machine ─────────────────────────────────────────────────────────────

/// The four live poses follow (moving, firing); death overrides everything.
#[test]
fn animation_state_follows_input_with_death_override() {
    let mut app = combat_app();
    let player = spawn_character(&mut app, 100, 0.0, true);

    let cases = [
        (false, false, AnimationState::Idle),
        (true, false, AnimationState::Run),
        (false, true, AnimationState::IdleShoot),
        (true, true, AnimationState::RunShoot),
    ];
    for (moving, firing, expected) in cases {
        {
            let mut stick = app.world_mut().resource_mut::<StickState>();
            stick.sample = if moving {
                StickSample {
                    x: 0.0,
                    y: 1.0,
                    angle: 0.0,
                    magnitude: 1.0,
                }
            } else {
                StickSample::NEUTRAL
            };
            stick.fire_held = firing;
        }
        app.update();
        assert_eq!(*app.world().get::<AnimationState>(player).unwrap(), expected);
        // Drain any bullet fired by the shooting cases so later frames
        // start clean.
        let world = app.world_mut();
        let bullets: Vec<Entity> = world
            .query_filtered::<Entity, With<Bullet>>()
            .iter(world)
            .collect();
        for bullet in bullets {
            world.entity_mut(bullet).despawn();
        }
    }

    // Death wins regardless of input.
    app.world_mut()
        .get_mut::<CharacterHealth>(player)
        .unwrap()
        .respawn_timer = Some(10.0);
    app.update();
    assert_eq!(
        *app.world().get::<AnimationState>(player).unwrap(),
        AnimationState::Death
    );
}

/// The follow camera pulls back further while dead than while alive.
#[test]
fn follow_camera_switches_offsets_on_death() {
    let mut app = combat_app();
    let player = spawn_character(&mut app, 100, 0.0, true);

    app.update();
    let alive_eye = app.world().resource::<FollowCamera>().eye;

    app.world_mut()
        .get_mut::<CharacterHealth>(player)
        .unwrap()
        .respawn_timer = Some(10.0);
    app.update();
    let dead_eye = app.world().resource::<FollowCamera>().eye;

    let config = CombatConfig::default();
    assert!((alive_eye.y - config.camera_height).abs() < 1e-5);
    assert!((dead_eye.y - config.camera_dead_height).abs() < 1e-5);
    assert!(dead_eye.z < alive_eye.z);
}
