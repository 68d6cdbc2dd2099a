use winit::dpi::PhysicalSize;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::light::PointLight;
use crate::mesh::{SphereGeometry, SphereMesh};
use crate::util::math::degree_to_radian;

pub const SPHERE_RADIUS: f32 = 1.5;
pub const SPHERE_SECTORS: u32 = 32;
pub const SPHERE_STACKS: u32 = 32;

/// #cae3d1, the fixed pale material tone.
pub const SPHERE_BASE_COLOR: glam::Vec3 = glam::Vec3::new(0.792, 0.890, 0.820);

const INITIAL_TILT_Y_DEGREES: f32 = -30.0;

#[derive(Debug, Clone)]
pub struct Scene {
    pub sphere: SphereMesh,
    pub light: PointLight,
    pub background: wgpu::Color,
}

/// Build the scene and camera from the config and the surface's current
/// dimensions. Pure CPU construction: no GPU allocation and no texture I/O
/// happens here, so this cannot fail. A bad texture path is the texture
/// loader's problem, and it degrades rather than erroring.
///
/// The surface height must be nonzero; the shell guarantees a laid-out
/// window before mount.
pub fn build_scene(config: &RenderConfig, surface_size: PhysicalSize<u32>) -> (Scene, Camera) {
    let geometry = SphereGeometry::new(SPHERE_RADIUS, SPHERE_SECTORS, SPHERE_STACKS);
    let mut sphere = SphereMesh::new(geometry, SPHERE_BASE_COLOR);
    // static starting pose, never reapplied
    sphere.rotation = glam::Vec3::new(0.0, degree_to_radian(INITIAL_TILT_Y_DEGREES), 0.0);

    let light = PointLight {
        position: glam::Vec3::new(0.0, 0.0, 5.0),
        color: glam::Vec3::ONE,
        intensity: 1.5,
    };

    let scene = Scene {
        sphere,
        light,
        background: wgpu::Color::BLACK,
    };
    let camera = Camera::from_config(config, surface_size);
    (scene, camera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_holds_one_mesh_and_one_light() {
        let (scene, camera) = build_scene(&RenderConfig::default(), PhysicalSize::new(400, 200));
        assert_eq!(scene.sphere.geometry.vertices.len(), 33 * 33);
        assert_eq!(scene.light.intensity, 1.5);
        assert_eq!(scene.light.position, glam::Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.aspect_ratio, 2.0);
        assert_eq!(camera.position.z, 250.0);
    }

    #[test]
    fn sphere_starts_tilted_about_y() {
        let (scene, _) = build_scene(&RenderConfig::default(), PhysicalSize::new(400, 400));
        assert_eq!(scene.sphere.rotation.x, 0.0);
        assert!((scene.sphere.rotation.y - degree_to_radian(-30.0)).abs() < 1e-6);
        assert_eq!(scene.sphere.rotation.z, 0.0);
    }

    #[test]
    fn stage_inputs_reach_the_camera() {
        let config = RenderConfig {
            field_of_view: 1.0,
            near_clipping: 1.0,
            far_clipping: 1000.0,
            camera_z: 250.0,
            ..RenderConfig::default()
        };
        let (_, camera) = build_scene(&config, PhysicalSize::new(400, 200));
        assert_eq!(camera.fov_y, 1.0);
        assert_eq!(camera.z_near, 1.0);
        assert_eq!(camera.z_far, 1000.0);
        assert_eq!(camera.aspect_ratio, 2.0);
        assert_eq!(camera.position.z, 250.0);
    }

    #[test]
    fn bogus_texture_path_still_builds() {
        let config = RenderConfig {
            texture_path: "no/such/texture.png".to_string(),
            ..RenderConfig::default()
        };
        let (scene, camera) = build_scene(&config, PhysicalSize::new(640, 480));
        assert!(!scene.sphere.geometry.indices.is_empty());
        assert!(camera.aspect_ratio > 0.0);
    }

    #[test]
    fn background_is_black() {
        let (scene, _) = build_scene(&RenderConfig::default(), PhysicalSize::new(100, 100));
        assert_eq!(scene.background.r, 0.0);
        assert_eq!(scene.background.g, 0.0);
        assert_eq!(scene.background.b, 0.0);
    }
}
