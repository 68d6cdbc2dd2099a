use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// CPU-side UV sphere: one vertex ring per stack, two triangles per quad.
#[derive(Debug, Clone)]
pub struct SphereGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl SphereGeometry {
    pub fn new(radius: f32, sectors: u32, stacks: u32) -> Self {
        let sectors = sectors.max(3);
        let stacks = stacks.max(2);

        let mut vertices = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
        for stack in 0..=stacks {
            let v = stack as f32 / stacks as f32;
            // polar angle from the +Y pole
            let phi = v * PI;
            let (sin_phi, cos_phi) = phi.sin_cos();

            for sector in 0..=sectors {
                let u = sector as f32 / sectors as f32;
                let theta = u * TAU;
                let (sin_theta, cos_theta) = theta.sin_cos();

                let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
                vertices.push(Vertex {
                    position: [radius * normal[0], radius * normal[1], radius * normal[2]],
                    normal,
                    uv: [u, v],
                });
            }
        }

        let ring = sectors + 1;
        let mut indices = Vec::with_capacity((stacks * sectors * 6) as usize);
        for stack in 0..stacks {
            for sector in 0..sectors {
                let i0 = stack * ring + sector;
                let i1 = i0 + 1;
                let i2 = i0 + ring;
                let i3 = i2 + 1;

                // CCW seen from outside the sphere
                indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
            }
        }

        Self { vertices, indices }
    }
}

/// The one renderable object in the scene: fixed geometry and base color,
/// plus the per-axis rotation angles the animation loop advances.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub geometry: SphereGeometry,
    /// Euler angles (XYZ order), radians. Grows unbounded; only the
    /// orientation matters.
    pub rotation: glam::Vec3,
    pub base_color: glam::Vec3,
}

impl SphereMesh {
    pub fn new(geometry: SphereGeometry, base_color: glam::Vec3) -> Self {
        Self {
            geometry,
            rotation: glam::Vec3::ZERO,
            base_color,
        }
    }

    /// Advance the rotation by one animation tick.
    pub fn tick(&mut self, speed_x: f32, speed_y: f32) {
        self.rotation.x += speed_x;
        self.rotation.y += speed_y;
    }

    pub fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f32 = 1.5;

    fn sphere() -> SphereGeometry {
        SphereGeometry::new(RADIUS, 32, 32)
    }

    #[test]
    fn tessellation_counts() {
        let geometry = sphere();
        assert_eq!(geometry.vertices.len(), 33 * 33);
        assert_eq!(geometry.indices.len(), 32 * 32 * 6);
    }

    #[test]
    fn every_position_lies_on_the_sphere() {
        for vertex in &sphere().vertices {
            let length = glam::Vec3::from_array(vertex.position).length();
            assert!((length - RADIUS).abs() < 1e-4, "|p| = {length}");
        }
    }

    #[test]
    fn normals_are_unit_and_outward() {
        for vertex in &sphere().vertices {
            let normal = glam::Vec3::from_array(vertex.normal);
            assert!((normal.length() - 1.0).abs() < 1e-4);
            let position = glam::Vec3::from_array(vertex.position);
            assert!(position.dot(normal) > 0.0);
        }
    }

    #[test]
    fn uvs_cover_the_unit_square() {
        for vertex in &sphere().vertices {
            assert!((0.0..=1.0).contains(&vertex.uv[0]));
            assert!((0.0..=1.0).contains(&vertex.uv[1]));
        }
    }

    #[test]
    fn indices_stay_in_range() {
        let geometry = sphere();
        let count = geometry.vertices.len() as u32;
        assert!(geometry.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn tick_accumulates_per_axis() {
        let mut mesh = SphereMesh::new(sphere(), glam::Vec3::ONE);
        for _ in 0..1000 {
            mesh.tick(0.0, 0.001);
        }
        assert_eq!(mesh.rotation.x, 0.0);
        assert!((mesh.rotation.y - 1.0).abs() < 1e-4);
        assert_eq!(mesh.rotation.z, 0.0);
    }

    #[test]
    fn zero_speed_never_moves() {
        let mut mesh = SphereMesh::new(sphere(), glam::Vec3::ONE);
        mesh.rotation.y = -0.5;
        for _ in 0..100 {
            mesh.tick(0.0, 0.0);
        }
        assert_eq!(mesh.rotation, glam::Vec3::new(0.0, -0.5, 0.0));
    }

    #[test]
    fn zero_rotation_is_the_identity_transform() {
        let mesh = SphereMesh::new(sphere(), glam::Vec3::ONE);
        let matrix = mesh.model_matrix();
        assert!(matrix.abs_diff_eq(glam::Mat4::IDENTITY, 1e-6));
    }
}
