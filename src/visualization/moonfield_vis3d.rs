use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::simulation::scenario::Scene;
use crate::simulation::states::{BodyKind, NVec3};

/// Component tagging each mesh with its body index into Scene.system
#[derive(Component)]
struct BodyIndex(pub usize);

/// Influence point and cursor ray for the current frame
#[derive(Resource)]
struct PointerFeed {
    point: NVec3, // simulation units
    ray: Option<Ray3d>,
}

impl Default for PointerFeed {
    fn default() -> Self {
        Self {
            point: far_away(),
            ray: None,
        }
    }
}

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 18.0;

const STAR_COUNT: usize = 600;
const STAR_SHELL_RADIUS: f32 = 90.0;

/// Radius of the sphere the cursor ray must hit to hover a body
const PICK_RADIUS: f32 = 0.45;

const GLOW: LinearRgba = LinearRgba::rgb(1.2, 0.7, 0.25);

/// Influence point used when there is no cursor over the window
fn far_away() -> NVec3 {
    NVec3::new(1.0e6, 1.0e6, 1.0e6)
}

fn to_vec3(x: &NVec3) -> Vec3 {
    Vec3::new(x.x as f32, x.y as f32, x.z as f32)
}

fn to_nvec3(v: Vec3) -> NVec3 {
    NVec3::new(v.x as f64, v.y as f64, v.z as f64)
}

pub fn run_3d(scene: Scene) {
    App::new()
        .insert_resource(scene)
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 150.0,
        })
        .init_resource::<PointerFeed>()
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, (setup_scene, spawn_starfield))
        .add_systems(
            Update,
            (pointer_feed, hover_pick, physics_step, animate_hover, sync_bodies).chain(),
        )
        .run();
}

/// Startup system: camera, light, moon, and one mesh per body
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene: Res<Scene>,
) {
    scene.log_summary();

    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(0.0, 4.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 4_000_000.0,
            range: 100.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(8.0, 10.0, 12.0),
        ..Default::default()
    });

    // Moon
    commands.spawn(PbrBundle {
        mesh: meshes.add(Sphere::new(scene.attractor.radius as f32)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.85, 0.8),
            emissive: LinearRgba::rgb(0.5, 0.5, 0.45),
            ..Default::default()
        }),
        transform: Transform::from_translation(to_vec3(&scene.attractor.center)),
        ..Default::default()
    });

    for (i, body) in scene.system.bodies.iter().enumerate() {
        let mesh = match body.kind {
            BodyKind::Cube => meshes.add(Cuboid::new(0.5, 0.5, 0.5)),
            BodyKind::Sphere => meshes.add(Sphere::new(0.3)),
            BodyKind::Torus => meshes.add(Torus::new(0.15, 0.35)),
        };

        commands.spawn((
            PbrBundle {
                mesh,
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(0.55, 0.6, 0.9),
                    perceptual_roughness: 0.4,
                    ..Default::default()
                }),
                transform: Transform::from_translation(to_vec3(&scene.system.registry.get(i))),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

/// Small unlit spheres scattered over a distant shell
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(0.12));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..Default::default()
    });

    let mut rng = StdRng::seed_from_u64(0x5747);
    for _ in 0..STAR_COUNT {
        // Uniform direction on the unit sphere
        let z: f32 = rng.gen_range(-1.0..1.0);
        let phi: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
        let r_xy = (1.0 - z * z).sqrt();
        let dir = Vec3::new(r_xy * phi.cos(), r_xy * phi.sin(), z);
        let depth: f32 = rng.gen_range(0.8..1.2);

        commands.spawn(PbrBundle {
            mesh: mesh.clone(),
            material: material.clone(),
            transform: Transform::from_translation(dir * STAR_SHELL_RADIUS * depth),
            ..Default::default()
        });
    }
}

/// Project the cursor onto the z = 0 plane to get this frame's influence point
fn pointer_feed(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut feed: ResMut<PointerFeed>,
) {
    *feed = PointerFeed::default();

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Some(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    feed.ray = Some(ray);
    if let Some(t) = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Z)) {
        feed.point = to_nvec3(ray.get_point(t));
    }
}

/// Distance along `ray` to the first hit of a sphere, if any
fn ray_sphere(ray: &Ray3d, center: Vec3, radius: f32) -> Option<f32> {
    let oc = center - ray.origin;
    let t = oc.dot(*ray.direction);
    if t < 0.0 {
        return None;
    }
    let d2 = oc.length_squared() - t * t;
    (d2 <= radius * radius).then_some(t)
}

/// Nearest body under the cursor becomes hovered, every other body is cleared
fn hover_pick(feed: Res<PointerFeed>, mut scene: ResMut<Scene>) {
    let nearest = feed.ray.and_then(|ray| {
        scene
            .system
            .registry
            .all()
            .iter()
            .enumerate()
            .filter_map(|(i, x)| ray_sphere(&ray, to_vec3(x), PICK_RADIUS).map(|t| (i, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    });

    for (i, body) in scene.system.bodies.iter_mut().enumerate() {
        let hovered = nearest == Some(i);
        if body.hover.hovered != hovered {
            debug!("body {i} hover {}", if hovered { "enter" } else { "leave" });
            body.hover.hovered = hovered;
        }
    }
}

/// One frame pass of the motion rule
fn physics_step(feed: Res<PointerFeed>, mut scene: ResMut<Scene>) {
    scene.step(feed.point);
}

fn animate_hover(time: Res<Time>, mut scene: ResMut<Scene>) {
    let dt = time.delta_seconds() as f64;
    for body in scene.system.bodies.iter_mut() {
        body.hover.animate(dt);
    }
}

fn sync_bodies(
    scene: Res<Scene>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(&BodyIndex, &mut Transform, &Handle<StandardMaterial>)>,
) {
    for (BodyIndex(i), mut transform, material) in &mut query {
        let Some(body) = scene.system.bodies.get(*i) else {
            continue;
        };

        transform.translation = to_vec3(&scene.system.registry.get(*i));
        transform.scale = Vec3::splat(body.hover.display_scale() as f32);

        let emissive = if body.hover.hovered { GLOW } else { LinearRgba::BLACK };
        let stale = materials.get(material).is_some_and(|m| m.emissive != emissive);
        if stale {
            if let Some(m) = materials.get_mut(material) {
                m.emissive = emissive;
            }
        }
    }
}
