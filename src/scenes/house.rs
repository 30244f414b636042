use crate::mesh::MeshBuilder;
use crate::scene::{rgb, Scene};
use crate::types::LightUniform;
use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_4;

const WALL_COLOR: [f32; 3] = rgb(0x8b4513);
const FLOOR_COLOR: [f32; 3] = rgb(0xdeb887);
const DOOR_COLOR: [f32; 3] = rgb(0x333333);
const ROOF_COLOR: [f32; 3] = rgb(0x8b0000);
const GRASS_COLOR: [f32; 3] = rgb(0x228b22);
const DRIVEWAY_COLOR: [f32; 3] = rgb(0x555555);
const TRUNK_COLOR: [f32; 3] = rgb(0x8b4513);
const FOLIAGE_COLOR: [f32; 3] = rgb(0x006400);

/// Builds the house, driveway, and surrounding landscape.
pub fn create_house_scene() -> Scene {
    // Ambient 0.5 plus a 0.8 directional light shining from (5, 5, 5).
    let light = LightUniform::new(Vec3::new(5.0, 5.0, 5.0), 0.5, 0.8);
    let mut scene = Scene::new(light);

    // House walls
    let mut walls = MeshBuilder::new();
    walls.add_box(10.0, 5.0, 10.0);
    scene.add_object(
        walls.finish(),
        Mat4::from_translation(Vec3::new(0.0, 1.5, 0.0)),
        WALL_COLOR,
    );

    // Floor inside the house, slightly above ground to avoid z-fighting
    let mut floor = MeshBuilder::new();
    floor.add_plane(9.8, 9.8);
    scene.add_object(
        floor.finish(),
        Mat4::from_translation(Vec3::new(0.0, 0.01, 0.0)),
        FLOOR_COLOR,
    );

    // Doorway at the front of the house
    let mut door = MeshBuilder::new();
    door.add_box(2.0, 3.0, 0.1);
    scene.add_object(
        door.finish(),
        Mat4::from_translation(Vec3::new(0.0, 0.6, 5.05)),
        DOOR_COLOR,
    );

    // Pyramid roof: a four-segment cone rotated an eighth turn to line up
    // with the walls
    let mut roof = MeshBuilder::new();
    roof.add_cone(8.0, 4.0, 4);
    scene.add_object(
        roof.finish(),
        Mat4::from_translation(Vec3::new(0.0, 6.0, 0.0)) * Mat4::from_rotation_y(FRAC_PI_4),
        ROOF_COLOR,
    );

    // Grass field
    let mut grass = MeshBuilder::new();
    grass.add_plane(50.0, 50.0);
    scene.add_object(
        grass.finish(),
        Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0)),
        GRASS_COLOR,
    );

    // Driveway in front of the house
    let mut driveway = MeshBuilder::new();
    driveway.add_plane(3.0, 10.0);
    scene.add_object(
        driveway.finish(),
        Mat4::from_translation(Vec3::new(0.0, -0.9, 7.0)),
        DRIVEWAY_COLOR,
    );

    // Trees around the house
    for (x, z) in [
        (10.0, 10.0),
        (-10.0, 10.0),
        (10.0, -10.0),
        (-10.0, -10.0),
        (15.0, 0.0),
        (-15.0, 0.0),
        (0.0, -15.0),
    ] {
        add_tree(&mut scene, x, z);
    }

    println!("House scene created: {} objects", scene.object_count());
    scene
}

fn add_tree(scene: &mut Scene, x: f32, z: f32) {
    let mut trunk = MeshBuilder::new();
    trunk.add_cylinder(0.3, 2.0, 8);
    scene.add_object(
        trunk.finish(),
        Mat4::from_translation(Vec3::new(x, 1.0, z)),
        TRUNK_COLOR,
    );

    let mut foliage = MeshBuilder::new();
    foliage.add_sphere(1.5, 8, 8);
    scene.add_object(
        foliage.finish(),
        Mat4::from_translation(Vec3::new(x, 3.0, z)),
        FOLIAGE_COLOR,
    );
}
