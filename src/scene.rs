use crate::mesh::MeshData;
use crate::types::{LightUniform, SceneVertex};
use glam::Mat4;

/// Convert a 0xRRGGBB color literal to linear-ish float RGB.
pub const fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// One renderable: a mesh plus its placement and flat color.
pub struct SceneObject {
    pub mesh: MeshData,
    pub transform: Mat4,
    pub color: [f32; 3],
}

/// Static scene contents. Objects are baked into a single vertex batch at
/// upload; the paintings arrive later through the async loader and live in
/// the renderer's textured batch instead.
pub struct Scene {
    objects: Vec<SceneObject>,
    pub light: LightUniform,
}

impl Scene {
    pub fn new(light: LightUniform) -> Self {
        Self {
            objects: Vec::new(),
            light,
        }
    }

    pub fn add_object(&mut self, mesh: MeshData, transform: Mat4, color: [f32; 3]) -> usize {
        let idx = self.objects.len();
        self.objects.push(SceneObject {
            mesh,
            transform,
            color,
        });
        idx
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn iter_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Flatten every object into one triangle-list batch with transforms
    /// and colors applied.
    pub fn bake(&self) -> Vec<SceneVertex> {
        self.objects
            .iter()
            .flat_map(|o| o.mesh.baked(o.transform, o.color))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshBuilder;
    use glam::Vec3;

    #[test]
    fn rgb_decodes_hex_channels() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x000000), [0.0, 0.0, 0.0]);
        let brown = rgb(0x8b4513);
        assert!((brown[0] - 139.0 / 255.0).abs() < 1e-6);
        assert!((brown[1] - 69.0 / 255.0).abs() < 1e-6);
        assert!((brown[2] - 19.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn bake_concatenates_all_objects() {
        let light = LightUniform::new(Vec3::ONE, 0.5, 0.8);
        let mut scene = Scene::new(light);

        let mut b = MeshBuilder::new();
        b.add_plane(1.0, 1.0);
        scene.add_object(b.finish(), Mat4::IDENTITY, [1.0, 1.0, 1.0]);

        let mut b = MeshBuilder::new();
        b.add_box(1.0, 1.0, 1.0);
        scene.add_object(b.finish(), Mat4::IDENTITY, [0.0, 0.0, 0.0]);

        assert_eq!(scene.bake().len(), 6 + 36);
    }
}
