// Display surface - Native window, GPU context, and UI glue
//
// Owns the winit window, the wgpu surface/device/queue, and the egui
// context with its winit and wgpu bindings. All process-wide UI state
// lives here behind a single owner: created once at viewer construction,
// torn down once at shutdown, no globals.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::image::ImageFrame;

use super::config::ViewerConfig;
use super::error::ViewerError;
use super::texture::FrameTexture;

/// GPU context created alongside the window
pub struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    renderer: egui_wgpu::Renderer,
}

impl GpuContext {
    /// Upload one frame as a device texture registered with the UI renderer
    pub fn upload_frame(&mut self, frame: &ImageFrame) -> Result<FrameTexture, ViewerError> {
        FrameTexture::upload(&self.device, &self.queue, &mut self.renderer, frame)
    }

    /// Release a frame texture created by `upload_frame`
    pub fn release_frame(&mut self, texture: FrameTexture) {
        texture.release(&mut self.renderer);
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }
}

/// Display surface for the viewer
///
/// The window and GPU context are created when the event loop delivers
/// its first resume, which the viewer forces during construction by
/// pumping the loop once.
pub struct DisplaySurface {
    config: ViewerConfig,
    egui_ctx: egui::Context,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    egui_state: Option<egui_winit::State>,
    close_requested: bool,
    init_error: Option<ViewerError>,
}

impl DisplaySurface {
    /// Create a new display surface (window is created when the event loop starts)
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            egui_ctx: egui::Context::default(),
            window: None,
            gpu: None,
            egui_state: None,
            close_requested: false,
            init_error: None,
        }
    }

    /// Whether the window and GPU context are up
    pub fn is_initialized(&self) -> bool {
        self.gpu.is_some()
    }

    /// Take the error recorded during deferred initialization, if any
    pub fn take_init_error(&mut self) -> Option<ViewerError> {
        self.init_error.take()
    }

    /// Whether a close/quit request has been observed
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Latch a termination request (used when the event loop itself exits)
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// The UI context
    pub fn context(&self) -> &egui::Context {
        &self.egui_ctx
    }

    /// Mutable access to the GPU context, if initialized
    pub fn gpu_mut(&mut self) -> Option<&mut GpuContext> {
        self.gpu.as_mut()
    }

    /// Begin a new UI frame from the freshest window input
    pub fn begin_frame(&mut self) -> Result<(), ViewerError> {
        let window = self.window.as_ref().ok_or(ViewerError::NotInitialized)?;
        let state = self.egui_state.as_mut().ok_or(ViewerError::NotInitialized)?;

        let input = state.take_egui_input(window);
        self.egui_ctx.begin_pass(input);
        Ok(())
    }

    /// Finish the UI frame, composite, and present
    ///
    /// Clears the backbuffer to the configured background color, draws all
    /// UI output in one render pass, and presents the surface frame. This
    /// is the only point at which pixels reach the screen. A lost or
    /// outdated surface is reconfigured and the present skipped for this
    /// cycle; running out of surface memory is fatal.
    pub fn present(&mut self) -> Result<(), ViewerError> {
        let window = match self.window.as_ref() {
            Some(window) => window.clone(),
            None => return Err(ViewerError::NotInitialized),
        };
        let state = self.egui_state.as_mut().ok_or(ViewerError::NotInitialized)?;
        let gpu = self.gpu.as_mut().ok_or(ViewerError::NotInitialized)?;

        let output = self.egui_ctx.end_pass();
        state.handle_platform_output(&window, output.platform_output);

        let clipped = self
            .egui_ctx
            .tessellate(output.shapes, output.pixels_per_point);

        for (id, image_delta) in &output.textures_delta.set {
            gpu.renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }

        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                // Reconfigure now so the next cycle gets a valid frame
                gpu.surface.configure(&gpu.device, &gpu.surface_config);
                for id in &output.textures_delta.free {
                    gpu.renderer.free_texture(id);
                }
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                eprintln!("Surface frame timed out, skipping present");
                for id in &output.textures_delta.free {
                    gpu.renderer.free_texture(id);
                }
                return Ok(());
            }
            Err(err) => return Err(ViewerError::Surface(err)),
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("viewer-encoder"),
            });

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.surface_config.width, gpu.surface_config.height],
            pixels_per_point: output.pixels_per_point,
        };
        let user_buffers =
            gpu.renderer
                .update_buffers(&gpu.device, &gpu.queue, &mut encoder, &clipped, &screen);

        {
            let [r, g, b] = self.config.clear_color;
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("viewer-pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        depth_slice: None,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: r as f64,
                                g: g as f64,
                                b: b as f64,
                                a: 1.0,
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            gpu.renderer.render(&mut pass, &clipped, &screen);
        }

        for id in &output.textures_delta.free {
            gpu.renderer.free_texture(id);
        }

        gpu.queue
            .submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        window.pre_present_notify();
        frame.present();

        Ok(())
    }

    /// Tear down UI glue, GPU context, and window in reverse creation order
    ///
    /// Must be invoked exactly once; the viewer enforces this by consuming
    /// itself in `shutdown`.
    pub fn teardown(&mut self) {
        self.egui_state = None;
        self.gpu = None;
        self.window = None;
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;
        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("viewer-device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
        }))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if self.config.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &surface_config);

        let renderer = egui_wgpu::Renderer::new(
            &device,
            format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                ..Default::default()
            },
        );
        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        self.window = Some(window);
        self.gpu = Some(GpuContext {
            surface,
            device,
            queue,
            surface_config,
            renderer,
        });
        self.egui_state = Some(egui_state);

        Ok(())
    }
}

impl ApplicationHandler for DisplaySurface {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            self.init_error = Some(err);
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(window), Some(state)) = (self.window.as_ref(), self.egui_state.as_mut()) {
            let _ = state.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }
            }
            _ => {}
        }
    }
}
