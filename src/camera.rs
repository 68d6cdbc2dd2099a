use winit::dpi::PhysicalSize;

use crate::config::RenderConfig;
use crate::util::math::degree_to_radian;

/// Perspective camera looking at the origin from a point on the +Z axis.
pub struct Camera {
    pub position: glam::Vec3,
    /// Vertical field of view, degrees.
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    #[rustfmt::skip]
    pub const OPENGL_TO_WGPU_MATRIX: glam::Mat4 = glam::Mat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.0,
        0.0, 0.0, 0.5, 1.0,
    ]);

    /// Derive the projection from the config and the surface's current
    /// dimensions. The surface must have nonzero height.
    pub fn from_config(config: &RenderConfig, surface_size: PhysicalSize<u32>) -> Self {
        Self {
            position: glam::Vec3::new(0.0, 0.0, config.camera_z),
            fov_y: config.field_of_view,
            aspect_ratio: surface_size.width as f32 / surface_size.height as f32,
            z_near: config.near_clipping,
            z_far: config.far_clipping,
        }
    }

    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect_ratio = width / height;
    }

    pub fn view_projection_matrix(&self) -> glam::Mat4 {
        let view = glam::Mat4::look_at_rh(self.position, glam::Vec3::ZERO, glam::Vec3::Y);
        let proj = glam::Mat4::perspective_rh(
            degree_to_radian(self.fov_y),
            self.aspect_ratio,
            self.z_near,
            self.z_far,
        );
        // wgpu clip space spans 0..1 in z where OpenGL spans -1..1.
        Self::OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_follows_surface_size() {
        let camera = Camera::from_config(&RenderConfig::default(), PhysicalSize::new(400, 200));
        assert_eq!(camera.aspect_ratio, 2.0);
        assert_eq!(camera.position.z, 250.0);
    }

    #[test]
    fn set_aspect_ratio_rederives() {
        let mut camera = Camera::from_config(&RenderConfig::default(), PhysicalSize::new(400, 200));
        camera.set_aspect_ratio(300.0, 300.0);
        assert_eq!(camera.aspect_ratio, 1.0);
    }

    #[test]
    fn view_projection_is_finite() {
        let camera = Camera::from_config(&RenderConfig::default(), PhysicalSize::new(640, 480));
        let matrix = camera.view_projection_matrix();
        assert!(matrix.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = Camera::from_config(&RenderConfig::default(), PhysicalSize::new(640, 480));
        let clip = camera.view_projection_matrix() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        // inside the 0..1 depth range
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
