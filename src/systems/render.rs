//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The gasket pipeline, fed through the session's upload traits
//! - The egui overlay pass

use std::sync::Arc;
use winit::window::Window;

use gasket_core::{Mat4, TextureId, UniformWriter, Uploader, Vec4};
use gasket_render::{ContextError, GasketVertex, RenderContext, RenderPipeline};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

/// Tessellated egui output for one frame
pub struct UiFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: RenderPipeline,
    egui_renderer: egui_wgpu::Renderer,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system for a window
    pub fn new(
        window: Arc<Window>,
        clear_color: wgpu::Color,
        vsync: bool,
    ) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))?;

        let pipeline = RenderPipeline::new(
            &context.device,
            &context.queue,
            context.config.format,
            context.size.width,
            context.size.height,
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&context.device, context.config.format, None, 1, false);

        log::info!(
            "Render system ready ({}x{}, {:?})",
            context.config.width,
            context.config.height,
            context.config.format
        );

        Ok(Self {
            context,
            pipeline,
            egui_renderer,
            clear_color,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline
            .ensure_depth_texture(&self.context.device, self.context.config.width, self.context.config.height);
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Render the gasket with the UI on top
    pub fn render_frame(&mut self, ui: UiFrame) -> Result<(), RenderError> {
        let device = &self.context.device;
        let queue = &self.context.queue;

        // Texture uploads must not be skipped even if this frame is dropped
        for (id, delta) in &ui.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, delta);
        }

        let result = self.draw(&ui);

        for id in &ui.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        result
    }

    fn draw(&mut self, ui: &UiFrame) -> Result<(), RenderError> {
        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = &self.context.device;
        let queue = &self.context.queue;

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.context.config.width, self.context.config.height],
            pixels_per_point: ui.pixels_per_point,
        };

        self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &ui.paint_jobs,
            &screen_descriptor,
        );

        self.pipeline.render(&mut encoder, &view, self.clear_color);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &ui.paint_jobs, &screen_descriptor);
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl Uploader for RenderSystem {
    fn set_vertex_stream(&mut self, points: &[Vec4], colors: &[[f32; 4]], tex_coords: &[[f32; 2]]) {
        let vertices = GasketVertex::interleave(points, colors, tex_coords);
        self.pipeline
            .upload_vertices(&self.context.device, &self.context.queue, &vertices);
        log::debug!("Uploaded {} vertices", vertices.len());
    }

    fn set_texture(&mut self, texture: TextureId) {
        self.pipeline.set_texture(texture);
    }
}

impl UniformWriter for RenderSystem {
    fn set_transform(&mut self, matrix: Mat4) {
        self.pipeline.set_model_view(&self.context.queue, matrix);
    }

    fn set_projection(&mut self, matrix: Mat4) {
        self.pipeline.set_projection(&self.context.queue, matrix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_mapping() {
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::Lost),
            RenderError::SurfaceLost
        ));
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::Outdated),
            RenderError::SurfaceLost
        ));
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::OutOfMemory),
            RenderError::OutOfMemory
        ));
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::Timeout),
            RenderError::Other(_)
        ));
    }

    #[test]
    fn test_render_error_display() {
        assert_eq!(RenderError::SurfaceLost.to_string(), "Surface lost");
        assert_eq!(RenderError::OutOfMemory.to_string(), "Out of memory");
        assert!(RenderError::Other("x".into()).to_string().contains("x"));
    }
}
