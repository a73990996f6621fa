//! Interactive vortex particle field
//!
//! Points are pulled toward and swirled around the mouse cursor. Hold the
//! left button for turbo, press Space to pause and Escape to quit.

mod cli;

use std::sync::Arc;

use anyhow::{anyhow, Context};
use cli::Invocation;
use glam::Vec2;
use vortex_physics::Particle;
use vortex_renderer::{PointRenderer, RenderInitError, ScreenUniform};
use vortex_simulation::{
    FrameDriver, FrameStatus, InputFrame, PointSink, ShardLayout, SimulationConfig,
};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: PointRenderer,
}

impl GpuState {
    async fn new(
        window: Arc<Window>,
        sim_config: &SimulationConfig,
        particle_count: usize,
    ) -> Result<Self, RenderInitError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = choose_surface_format(&surface_caps.formats)?;

        // Frame pacing is done by the driver, not by vsync
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: choose_alpha_mode(&surface_caps.alpha_modes),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let screen = ScreenUniform::new(config.width, config.height, sim_config.wrap);
        let renderer = PointRenderer::new(&device, config.format, screen, particle_count);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer
                .resize(&self.queue, new_size.width, new_size.height);
        }
    }
}

/// Prefer an sRGB format, otherwise take whatever the surface offers first
fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
) -> Result<wgpu::TextureFormat, RenderInitError> {
    formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first())
        .copied()
        .ok_or(RenderInitError::NoSurfaceFormat)
}

fn choose_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

impl PointSink for GpuState {
    type Error = wgpu::SurfaceError;

    fn draw_points(&mut self, particles: &[Particle]) -> Result<(), Self::Error> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render(&self.device, &self.queue, &view, particles);

        output.present();
        Ok(())
    }
}

struct App {
    config: SimulationConfig,
    layout: ShardLayout,

    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    driver: Option<FrameDriver>,

    // Input collected since the last frame
    input: InputFrame,

    // First fatal error; reported after the event loop returns
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: SimulationConfig, layout: ShardLayout) -> Self {
        Self {
            config,
            layout,
            window: None,
            gpu_state: None,
            driver: None,
            input: InputFrame::default(),
            error: None,
        }
    }

    /// Window and GPU first; particles are only allocated once the platform is up
    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Vortex")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.screen_width,
                self.config.screen_height,
            ))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("window could not be created")?,
        );

        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            &self.config,
            self.layout.total(),
        ))
        .context("could not initialise rendering")?;
        log::info!("✓ Renderer initialized");

        let driver = FrameDriver::from_config(&self.config)?;
        log::info!("✓ Simulation initialized");

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.driver = Some(driver);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu_state), Some(driver)) =
            (&self.window, &mut self.gpu_state, &mut self.driver)
        else {
            return;
        };

        match driver.tick(self.input.take(), gpu_state) {
            Ok(FrameStatus::Continue) => {
                let stats = driver.stats();
                window.set_title(&format!(
                    "Vortex - {:.0} FPS ({:.2}ms) - {} particles{}",
                    stats.fps(),
                    stats.average_frame_time_ms(),
                    driver.simulation().population().len(),
                    if driver.simulation().is_paused() {
                        " - paused"
                    } else {
                        ""
                    }
                ));
            }
            Ok(FrameStatus::Quit) => event_loop.exit(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.resize(window.inner_size())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return self.fail(event_loop, anyhow!("GPU out of memory"));
            }
            Err(e) => log::warn!("Render error: {e:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() && self.error.is_none() {
            if let Err(error) = self.start(event_loop) {
                self.fail(event_loop, error);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.input.record_quit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.input.record_pause_toggle(),

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.input.record_pointer_down(),

            WindowEvent::MouseInput {
                state: ElementState::Released,
                ..
            } => self.input.record_pointer_up(),

            WindowEvent::CursorMoved { position, .. } => self
                .input
                .record_pointer_motion(Vec2::new(position.x as f32, position.y as f32)),

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::RedrawRequested => self.frame(event_loop),

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logger (RUST_LOG=debug for per-frame timings)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = match cli::parse(std::env::args_os()) {
        Invocation::Run(config) => config,
        Invocation::Usage(message) => {
            eprint!("{message}");
            std::process::exit(1);
        }
    };
    config.validate()?;

    // Resolve the worker count once, before anything is allocated
    let layout = config.shard_layout()?;
    config.worker_count = Some(layout.worker_count);

    log::info!("Starting vortex particle simulation...");

    let event_loop = EventLoop::new().context("could not initialise windowing")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, layout);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
