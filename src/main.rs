//! Demo harness: a window, a flat arena, two characters, and the combat
//! core.  Everything here is presentation glue — the simulation itself
//! lives in the library.

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier3d::prelude::*;

use skirmish::character::{self, FollowCamera};
use skirmish::config::CombatConfig;
use skirmish::director::{CharacterKilled, ShotFired};
use skirmish::CombatPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Skirmish".into(),
                resolution: WindowResolution::new(1200, 680),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.14, 0.14, 0.14)))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(CombatPlugin)
        .add_systems(Startup, (setup_camera, spawn_arena, spawn_combatants))
        .add_systems(Update, (apply_follow_camera_system, log_combat_events_system))
        .run();
}

/// Spawn the 3D camera; [`apply_follow_camera_system`] keeps it on the
/// follow target every frame.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 30.0, 0.1).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Flat arena: a floor slab and four boundary walls, all fixed bodies in
/// collision group 1.
fn spawn_arena(mut commands: Commands, config: Res<CombatConfig>) {
    let half = config.arena_half_extent;
    let wall_half_height = config.arena_wall_height / 2.0;
    let arena_groups = CollisionGroups::new(
        bevy_rapier3d::geometry::Group::GROUP_1,
        bevy_rapier3d::geometry::Group::ALL,
    );

    // Floor slab.
    commands.spawn((
        RigidBody::Fixed,
        Collider::cuboid(half, 0.5, half),
        arena_groups,
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));

    // Boundary walls.
    let walls = [
        (Vec3::new(0.0, wall_half_height, -half), Vec3::new(half, wall_half_height, 0.5)),
        (Vec3::new(0.0, wall_half_height, half), Vec3::new(half, wall_half_height, 0.5)),
        (Vec3::new(-half, wall_half_height, 0.0), Vec3::new(0.5, wall_half_height, half)),
        (Vec3::new(half, wall_half_height, 0.0), Vec3::new(0.5, wall_half_height, half)),
    ];
    for (position, half_extents) in walls {
        commands.spawn((
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            arena_groups,
            Transform::from_translation(position),
        ));
    }
}

/// The local player at the origin plus one stationary sparring target, so
/// the full damage path can be exercised out of the box.
fn spawn_combatants(mut commands: Commands, config: Res<CombatConfig>) {
    character::spawn_character(&mut commands, &config, Vec3::ZERO, true);
    character::spawn_character(&mut commands, &config, Vec3::new(0.0, 0.0, 8.0), false);
}

/// Apply the core's follow-camera target to the actual camera.
fn apply_follow_camera_system(
    follow: Res<FollowCamera>,
    mut camera: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    *transform = Transform::from_translation(follow.eye).looking_at(follow.target, Vec3::Y);
}

/// Stand-in for the audio/scoreboard layer: log fire and kill notifications.
fn log_combat_events_system(
    mut shots: MessageReader<ShotFired>,
    mut kills: MessageReader<CharacterKilled>,
) {
    for shot in shots.read() {
        debug!("[demo] shot by {:?} at angle {:.2}", shot.shooter, shot.angle);
    }
    for kill in kills.read() {
        info!("[demo] {:?} killed {:?}", kill.attacker, kill.victim);
    }
}
