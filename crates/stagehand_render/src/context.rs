//! WGPU device, queue, and surface management
//!
//! `RenderContext` is the windowed [`Engine`] backend: it owns the surface
//! bound to the winit window, reconfigures it on resize, clears the frame
//! each render, draws the debug overlay while visible, and reports the
//! frame-to-frame delta.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use stagehand_core::{Camera, Engine, Light, RenderError, Scene, SceneRef, SceneSettings};

use crate::overlay::OverlayPipeline;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.08,
    a: 1.0,
};

/// Windowed rendering backend
pub struct RenderContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    msaa_view: Option<wgpu::TextureView>,
    overlay: OverlayPipeline,
    overlay_visible: bool,
    loop_running: bool,
    offline_support: bool,
    last_frame: Instant,
    last_delta_ms: f32,
}

impl RenderContext {
    /// Create a context bound to a window
    ///
    /// `antialias` selects 4x MSAA. `options` carries opaque backend hints;
    /// this backend reads `power_preference` (`"low-power"` /
    /// `"high-performance"`) and `present_mode` (`"immediate"` / `"fifo"`).
    /// Construction failures abort initialization; there is no recovery from
    /// a missing adapter or device.
    pub async fn new(
        window: Arc<Window>,
        antialias: bool,
        options: &BTreeMap<String, String>,
    ) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .expect("Failed to create surface");

        let power_preference = match options.get("power_preference").map(String::as_str) {
            Some("low-power") => wgpu::PowerPreference::LowPower,
            Some("high-performance") => wgpu::PowerPreference::HighPerformance,
            _ => wgpu::PowerPreference::default(),
        };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to find a compatible adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Stagehand Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .expect("Failed to create device");

        let capabilities = surface.get_capabilities(&adapter);
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(capabilities.formats[0]);

        let present_mode = match options.get("present_mode").map(String::as_str) {
            Some("immediate") => wgpu::PresentMode::Immediate,
            Some("fifo") => wgpu::PresentMode::Fifo,
            _ => wgpu::PresentMode::Fifo,
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if antialias { 4 } else { 1 };
        let msaa_view = Self::create_msaa_view(&device, &config, sample_count);
        let overlay = OverlayPipeline::new(&device, format, sample_count);

        log::info!(
            "Render context ready: {}x{}, {:?}, {}x MSAA",
            config.width,
            config.height,
            format,
            sample_count
        );

        Self {
            surface,
            device,
            queue,
            config,
            sample_count,
            msaa_view,
            overlay,
            overlay_visible: false,
            loop_running: false,
            offline_support: false,
            last_frame: Instant::now(),
            last_delta_ms: 0.0,
        }
    }

    fn create_msaa_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Option<wgpu::TextureView> {
        if sample_count == 1 {
            return None;
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Target"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }
}

impl Engine for RenderContext {
    fn create_scene(&mut self, settings: SceneSettings) -> SceneRef {
        log::info!(
            "Scene '{}' created ({}-handed)",
            settings.name,
            if settings.use_right_handed_system {
                "right"
            } else {
                "left"
            }
        );
        SceneRef::new(Scene::from_settings(settings))
    }

    fn set_offline_support(&mut self, enabled: bool) {
        self.offline_support = enabled;
    }

    fn run_render_loop(&mut self) {
        self.loop_running = true;
        self.last_frame = Instant::now();
    }

    fn stop_render_loop(&mut self) {
        self.loop_running = false;
    }

    fn render_loop_running(&self) -> bool {
        self.loop_running
    }

    fn render(
        &mut self,
        scene: &SceneRef,
        cameras: &[Camera],
        lights: &[Light],
    ) -> Result<(), RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Backend(e.to_string())),
        };

        let now = Instant::now();
        self.last_delta_ms = (now - self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;

        log::trace!(
            "frame: scene '{}', {} cameras, {} lights",
            scene.name(),
            cameras.len(),
            lights.len()
        );

        let frame_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let (view, resolve_target) = match &self.msaa_view {
                Some(msaa) => (msaa, Some(&frame_view)),
                None => (&frame_view, None),
            };

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.overlay_visible {
                self.overlay.draw(&mut pass);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn delta_time_ms(&mut self) -> f32 {
        self.last_delta_ms
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.msaa_view = Self::create_msaa_view(&self.device, &self.config, self.sample_count);
        log::debug!("Surface resized to {}x{}", self.config.width, self.config.height);
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn debug_overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    fn show_debug_overlay(&mut self) {
        self.overlay_visible = true;
        log::info!("Debug overlay shown");
    }

    fn hide_debug_overlay(&mut self) {
        self.overlay_visible = false;
        log::info!("Debug overlay hidden");
    }
}
