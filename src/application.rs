use std::time::{Duration, Instant};

use wgpu::SurfaceError;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::*,
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::{Window, WindowBuilder},
};

/// Per-frame timing, advanced once per drained event queue.
#[derive(Debug)]
pub struct FrameClock {
    previous: Instant,
    delta: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous: Instant::now(),
            delta: Duration::ZERO,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.previous);
        self.previous = now;
    }

    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle seam between the application driver and whatever it displays.
///
/// `mount` runs once against a live surface; after that the driver calls
/// `tick` and `render` every frame until the window closes, at which point
/// `unmount` runs before the process exits.
pub trait View: Sized {
    type Config;

    fn mount(surface: &mut RenderSurface, config: &Self::Config) -> Self;
    fn tick(&mut self, clock: &FrameClock);
    fn render(&mut self, surface: &RenderSurface) -> Result<(), SurfaceError>;
    fn resize(&mut self, new_size: PhysicalSize<u32>);
    fn unmount(&mut self);
}

/// Owns the event loop and drives one view: mount on init, then a
/// self-perpetuating redraw request per drained event queue. Exits
/// deterministically on window close or Escape, unmounting the view first.
pub struct Application<V: View> {
    view: Option<V>,
    surface: RenderSurface,
    clock: FrameClock,
    config: V::Config,
}

impl<V: View + 'static> Application<V>
where
    V::Config: 'static,
{
    pub fn new(surface: RenderSurface, config: V::Config) -> Self {
        Self {
            surface,
            view: None,
            clock: FrameClock::new(),
            config,
        }
    }

    fn run(
        &mut self,
        event: Event<()>,
        _event_loop: &EventLoopWindowTarget<()>,
        control_flow: &mut ControlFlow,
    ) {
        // animation never idles, so keep the loop hot; vsync paces the frames
        control_flow.set_poll();

        match event {
            Event::NewEvents(StartCause::Init) => {
                self.view = Some(V::mount(&mut self.surface, &self.config));
            }
            Event::WindowEvent {
                window_id,
                ref event,
            } if self.surface.window().id() == window_id => match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                    ..
                } => {
                    if let Some(view) = self.view.as_mut() {
                        view.unmount();
                    }
                    control_flow.set_exit();
                }
                WindowEvent::Resized(physical_size) => {
                    self.surface.resize(*physical_size);
                    if let Some(view) = self.view.as_mut() {
                        view.resize(*physical_size);
                    }
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    self.surface.resize(**new_inner_size);
                    if let Some(view) = self.view.as_mut() {
                        view.resize(**new_inner_size);
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                self.clock.tick();
                self.surface.window().request_redraw();
            }
            Event::RedrawRequested(window_id) if self.surface.window().id() == window_id => {
                if let Some(view) = self.view.as_mut() {
                    view.tick(&self.clock);
                    match view.render(&self.surface) {
                        Ok(_) => {}
                        Err(SurfaceError::Lost) => self.surface.resize_to_current(),
                        Err(SurfaceError::OutOfMemory) => {
                            tracing::error!("render surface out of memory");
                            control_flow.set_exit_with_code(1);
                        }
                        Err(e) => tracing::error!("{:?}", e),
                    }
                }
            }
            _ => {}
        }
    }

    pub async fn launch(title: &str, window_size: LogicalSize<f64>, config: V::Config) {
        let event_loop = EventLoop::new();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = RenderSurface::new(&event_loop, &instance, title, window_size).await;
        let mut application = Self::new(surface, config);
        event_loop.run(move |event, event_loop, control_flow| {
            application.run(event, event_loop, control_flow);
        });
    }
}

/// A renderer bound to one window. The output buffer is sized to the
/// window's inner dimensions in physical pixels, i.e. layout size times the
/// device pixel ratio winit reports as the scale factor.
pub struct RenderSurface {
    pub surface: wgpu::Surface,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    window: Window,
}

impl RenderSurface {
    pub async fn new(
        event_loop: &EventLoopWindowTarget<()>,
        instance: &wgpu::Instance,
        title: &str,
        size: LogicalSize<f64>,
    ) -> Self {
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(size)
            .build(event_loop)
            .unwrap();

        // SAFETY:
        // The surface needs to live as long as the window that created it.
        // RenderSurface owns the window so this should be safe.
        let surface = unsafe { instance.create_surface(&window) }.unwrap();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: adapter.features(),
                    limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await
            .unwrap();
        let physical = window.inner_size();
        let config = surface
            .get_default_config(&adapter, physical.width, physical.height)
            .unwrap();
        surface.configure(&device, &config);

        tracing::info!(
            width = physical.width,
            height = physical.height,
            pixel_ratio = window.scale_factor(),
            "render surface bound"
        );

        Self {
            surface,
            device,
            queue,
            config,
            window,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current output buffer size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Reconfigure the output buffer for a new window size. Zero-sized
    /// updates (minimized window) are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure to the current window inner size.
    pub fn resize_to_current(&mut self) {
        self.resize(self.window.inner_size());
    }
}
