/// Omnidirectional light at a fixed point in the scene.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: glam::Vec3,
    /// Linear RGB in 0..1.
    pub color: glam::Vec3,
    pub intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: glam::Vec3::ZERO,
            color: glam::Vec3::ONE,
            intensity: 1.0,
        }
    }
}
