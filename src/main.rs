//! Animated Sierpinski gasket
//!
//! Renders a recursively subdivided, textured tetrahedron and animates it
//! through a fixed sequence of rotations, scalings and translations.

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use gasket_core::{default_projection, Configuration, GasketSession, Limits};
use gasket3d::config::AppConfig;
use gasket3d::systems::{RedrawRequester, RenderError, RenderSystem, UiFrame, WindowSystem};
use gasket3d::ui::{self, PanelInfo, UiState};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    session: GasketSession,
    ui_state: UiState,
    egui_ctx: egui::Context,
    egui_state: Option<egui_winit::State>,
    window_system: Option<WindowSystem>,
    render_system: Option<RenderSystem>,
    frames: Option<RedrawRequester<Arc<Window>>>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let (settings, limits) = config.session_settings().unwrap_or_else(|e| {
            log::warn!("{}. Using default gasket settings.", e);
            (Configuration::default(), Limits::default())
        });
        let projection = config.rendering.projection().unwrap_or_else(|e| {
            log::warn!("{}. Using the default view volume.", e);
            default_projection()
        });

        let session = GasketSession::new(settings, limits, projection);
        let ui_state = UiState::from_config(session.config());

        Self {
            config,
            session,
            ui_state,
            egui_ctx: egui::Context::default(),
            egui_state: None,
            window_system: None,
            render_system: None,
            frames: None,
        }
    }

    /// Create the window and GPU state; false if the GPU is unusable
    fn init(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window_system = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(w) => w,
            Err(e) => {
                log::error!("{}", e);
                return false;
            }
        };
        let window = Arc::clone(window_system.window());

        let mut render_system = match RenderSystem::new(
            Arc::clone(&window),
            self.config.rendering.clear_color(),
            self.config.window.vsync,
        ) {
            Ok(r) => r,
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                return false;
            }
        };

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        self.session.initialize(&mut render_system);

        self.frames = Some(RedrawRequester::new(Arc::clone(&window)));
        self.egui_state = Some(egui_state);
        self.render_system = Some(render_system);
        self.window_system = Some(window_system);
        true
    }

    /// Advance the animation if a frame is due, then draw
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window_system), Some(render_system), Some(frames), Some(egui_state)) = (
            &mut self.window_system,
            &mut self.render_system,
            &mut self.frames,
            &mut self.egui_state,
        ) else {
            return;
        };

        if let Some(handle) = frames.take_due() {
            self.session.on_frame(handle, render_system, frames);
        }

        // Build the UI
        self.ui_state.sync(self.session.config());
        let info = PanelInfo {
            enabled: self.session.controls_enabled(),
            limits: *self.session.limits(),
            progress: self.session.progress(),
            triangle_count: self.session.geometry().triangle_count(),
            show_status: self.config.debug.show_status,
        };

        let window = window_system.window();
        let raw_input = egui_state.take_egui_input(window);
        let ui_state = &mut self.ui_state;
        let mut events = Vec::new();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            events = ui::draw_side_panel(ctx, ui_state, &info);
        });
        egui_state.handle_platform_output(window, full_output.platform_output);

        // Apply edits; rejected ones are logged by the session
        let mut changed = false;
        for event in events {
            if self.session.apply(event, render_system, frames).is_ok() {
                changed = true;
            }
        }
        self.ui_state.sync(self.session.config());

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let ui_frame = UiFrame {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        };

        match render_system.render_frame(ui_frame) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                render_system.recover_surface();
                changed = true;
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("{}", e),
        }

        window_system.update_title(self.session.progress().as_ref());

        let ui_wants_repaint = full_output
            .viewport_output
            .get(&self.egui_ctx.viewport_id())
            .is_some_and(|v| v.repaint_delay.is_zero());
        if changed || ui_wants_repaint {
            window_system.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_none() && !self.init(event_loop) {
            // No retry: without a GPU there is nothing to show
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(egui_state), Some(window_system)) = (&mut self.egui_state, &self.window_system) {
            let response = egui_state.on_window_event(window_system.window(), &event);
            if response.repaint {
                window_system.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(frames) = &mut self.frames {
                    self.session.cancel_run(frames);
                }
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(physical_size.width, physical_size.height);
                }
                if let Some(window_system) = &self.window_system {
                    window_system.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG still overrides the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting gasket viewer");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
