use std::path::Path;

use sphere_view_lib::{
    application::{Application, FrameClock, RenderSurface, View},
    camera::Camera,
    config::RenderConfig,
    renderer::SphereRenderer,
    scene::{build_scene, Scene},
    texture::Texture,
};
use winit::dpi::{LogicalSize, PhysicalSize};

const WINDOW_TITLE: &str = "sphere-view";
const DEFAULT_CONFIG_PATH: &str = "sphere.toml";

/// The sphere view: one textured sphere, one point light, a camera down the
/// Z axis, spinning a little further every frame.
struct SphereView {
    rotation_speed_x: f32,
    rotation_speed_y: f32,
    scene: Scene,
    camera: Camera,
    renderer: SphereRenderer,
}

impl View for SphereView {
    type Config = RenderConfig;

    fn mount(surface: &mut RenderSurface, config: &RenderConfig) -> Self {
        let texture = Texture::load(
            &surface.device,
            &surface.queue,
            &config.texture_path,
            Some("Sphere Diffuse"),
        );
        let (scene, camera) = build_scene(config, surface.size());
        let renderer = SphereRenderer::new(surface, &scene, &camera, texture);
        tracing::info!(texture = %config.texture_path, "sphere view mounted");

        Self {
            rotation_speed_x: config.rotation_speed_x,
            rotation_speed_y: config.rotation_speed_y,
            scene,
            camera,
            renderer,
        }
    }

    fn tick(&mut self, _clock: &FrameClock) {
        self.scene
            .sphere
            .tick(self.rotation_speed_x, self.rotation_speed_y);
    }

    fn render(&mut self, surface: &RenderSurface) -> Result<(), wgpu::SurfaceError> {
        self.renderer.render(surface, &self.scene, &self.camera)
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.height > 0 {
            self.camera
                .set_aspect_ratio(new_size.width as f32, new_size.height as f32);
        }
    }

    fn unmount(&mut self) {
        tracing::info!("sphere view unmounted");
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = match RenderConfig::load(Path::new(&config_path)) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "could not load configuration");
            std::process::exit(2);
        }
    };
    if let Err(error) = config.validate() {
        tracing::error!(%error, "invalid configuration");
        std::process::exit(2);
    }

    let window_size = LogicalSize::new(config.size, config.size);
    pollster::block_on(Application::<SphereView>::launch(
        WINDOW_TITLE,
        window_size,
        config,
    ));
}
