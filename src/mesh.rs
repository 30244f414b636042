//! Procedural mesh generators for the scene primitives.
//!
//! All shapes are centered at the origin with Y up; placement happens via
//! the transform on the owning scene object.

use crate::types::{SceneVertex, TexturedVertex};
use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// Vertex with position and normal, before per-object color and transform
/// are baked in.
#[derive(Copy, Clone, Debug)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Built mesh data ready to be baked into a GPU batch.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Apply a rigid transform and a flat color, producing GPU vertices.
    pub fn baked(&self, transform: Mat4, color: [f32; 3]) -> Vec<SceneVertex> {
        self.vertices
            .iter()
            .map(|v| SceneVertex {
                position: transform.transform_point3(v.position).to_array(),
                normal: transform
                    .transform_vector3(v.normal)
                    .normalize_or_zero()
                    .to_array(),
                color,
            })
            .collect()
    }
}

/// Fluent builder producing flat-shaded triangle lists.
pub struct MeshBuilder {
    vertices: Vec<MeshVertex>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Add a triangle with automatic face normal.
    pub fn add_triangle(&mut self, p1: Vec3, p2: Vec3, p3: Vec3) -> &mut Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize_or_zero();
        for position in [p1, p2, p3] {
            self.vertices.push(MeshVertex { position, normal });
        }
        self
    }

    /// Add a quad (two triangles), vertices counter-clockwise.
    pub fn add_quad(&mut self, p1: Vec3, p2: Vec3, p3: Vec3, p4: Vec3) -> &mut Self {
        self.add_triangle(p1, p2, p3);
        self.add_triangle(p1, p3, p4);
        self
    }

    /// Add an axis-aligned box centered at the origin.
    pub fn add_box(&mut self, width: f32, height: f32, depth: f32) -> &mut Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let hd = depth / 2.0;

        // Front (Z+)
        self.add_quad(
            Vec3::new(-hw, -hh, hd),
            Vec3::new(hw, -hh, hd),
            Vec3::new(hw, hh, hd),
            Vec3::new(-hw, hh, hd),
        );
        // Back (Z-)
        self.add_quad(
            Vec3::new(hw, -hh, -hd),
            Vec3::new(-hw, -hh, -hd),
            Vec3::new(-hw, hh, -hd),
            Vec3::new(hw, hh, -hd),
        );
        // Top (Y+)
        self.add_quad(
            Vec3::new(-hw, hh, hd),
            Vec3::new(hw, hh, hd),
            Vec3::new(hw, hh, -hd),
            Vec3::new(-hw, hh, -hd),
        );
        // Bottom (Y-)
        self.add_quad(
            Vec3::new(-hw, -hh, -hd),
            Vec3::new(hw, -hh, -hd),
            Vec3::new(hw, -hh, hd),
            Vec3::new(-hw, -hh, hd),
        );
        // Right (X+)
        self.add_quad(
            Vec3::new(hw, -hh, hd),
            Vec3::new(hw, -hh, -hd),
            Vec3::new(hw, hh, -hd),
            Vec3::new(hw, hh, hd),
        );
        // Left (X-)
        self.add_quad(
            Vec3::new(-hw, -hh, -hd),
            Vec3::new(-hw, -hh, hd),
            Vec3::new(-hw, hh, hd),
            Vec3::new(-hw, hh, -hd),
        );

        self
    }

    /// Add a horizontal plane facing +Y, centered at the origin.
    pub fn add_plane(&mut self, width: f32, depth: f32) -> &mut Self {
        let hw = width / 2.0;
        let hd = depth / 2.0;
        self.add_quad(
            Vec3::new(-hw, 0.0, hd),
            Vec3::new(hw, 0.0, hd),
            Vec3::new(hw, 0.0, -hd),
            Vec3::new(-hw, 0.0, -hd),
        )
    }

    /// Add a cone along +Y, centered vertically (apex at +height/2).
    /// Four radial segments make the pyramid roof.
    pub fn add_cone(&mut self, radius: f32, height: f32, segments: u32) -> &mut Self {
        let segments = segments.max(3);
        let apex = Vec3::new(0.0, height / 2.0, 0.0);
        let base_y = -height / 2.0;

        for i in 0..segments {
            let a1 = (i as f32 / segments as f32) * TAU;
            let a2 = ((i + 1) as f32 / segments as f32) * TAU;
            let p1 = Vec3::new(a1.cos() * radius, base_y, a1.sin() * radius);
            let p2 = Vec3::new(a2.cos() * radius, base_y, a2.sin() * radius);

            // Side face
            self.add_triangle(apex, p2, p1);
            // Base cap
            self.add_triangle(Vec3::new(0.0, base_y, 0.0), p1, p2);
        }

        self
    }

    /// Add a cylinder along +Y, centered vertically, with both caps.
    pub fn add_cylinder(&mut self, radius: f32, height: f32, segments: u32) -> &mut Self {
        let segments = segments.max(3);
        let hh = height / 2.0;

        for i in 0..segments {
            let a1 = (i as f32 / segments as f32) * TAU;
            let a2 = ((i + 1) as f32 / segments as f32) * TAU;
            let x1 = a1.cos() * radius;
            let z1 = a1.sin() * radius;
            let x2 = a2.cos() * radius;
            let z2 = a2.sin() * radius;

            // Side faces
            self.add_quad(
                Vec3::new(x2, -hh, z2),
                Vec3::new(x1, -hh, z1),
                Vec3::new(x1, hh, z1),
                Vec3::new(x2, hh, z2),
            );
            // Top cap
            self.add_triangle(
                Vec3::new(0.0, hh, 0.0),
                Vec3::new(x2, hh, z2),
                Vec3::new(x1, hh, z1),
            );
            // Bottom cap
            self.add_triangle(
                Vec3::new(0.0, -hh, 0.0),
                Vec3::new(x1, -hh, z1),
                Vec3::new(x2, -hh, z2),
            );
        }

        self
    }

    /// Add a UV sphere with smooth normals.
    pub fn add_sphere(&mut self, radius: f32, sectors: u32, stacks: u32) -> &mut Self {
        let sectors = sectors.max(3);
        let stacks = stacks.max(2);

        let point = |stack: u32, sector: u32| {
            let phi = (stack as f32 / stacks as f32) * std::f32::consts::PI;
            let theta = (sector as f32 / sectors as f32) * TAU;
            Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            )
        };

        for stack in 0..stacks {
            for sector in 0..sectors {
                let n00 = point(stack, sector);
                let n01 = point(stack, sector + 1);
                let n10 = point(stack + 1, sector);
                let n11 = point(stack + 1, sector + 1);

                // Degenerate at the poles: skip the collapsed triangle.
                if stack > 0 {
                    self.add_smooth_triangle(n00, n01, n10, radius);
                }
                if stack < stacks - 1 {
                    self.add_smooth_triangle(n01, n11, n10, radius);
                }
            }
        }

        self
    }

    fn add_smooth_triangle(&mut self, n1: Vec3, n2: Vec3, n3: Vec3, radius: f32) {
        for normal in [n1, n2, n3] {
            self.vertices.push(MeshVertex {
                position: normal * radius,
                normal,
            });
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn finish(self) -> MeshData {
        MeshData {
            vertices: self.vertices,
        }
    }
}

/// Vertical quad facing +Z with image UVs, for the painting planes.
pub fn painting_quad(width: f32, height: f32) -> Vec<TexturedVertex> {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let normal = [0.0, 0.0, 1.0];

    let tl = TexturedVertex {
        position: [-hw, hh, 0.0],
        normal,
        uv: [0.0, 0.0],
    };
    let tr = TexturedVertex {
        position: [hw, hh, 0.0],
        normal,
        uv: [1.0, 0.0],
    };
    let br = TexturedVertex {
        position: [hw, -hh, 0.0],
        normal,
        uv: [1.0, 1.0],
    };
    let bl = TexturedVertex {
        position: [-hw, -hh, 0.0],
        normal,
        uv: [0.0, 1.0],
    };

    vec![tl, bl, br, tl, br, tr]
}
