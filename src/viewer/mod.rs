// Viewer module - Interactive frame viewer coordinator
//
// This module provides the main viewer interface that coordinates the
// display surface, the per-cycle frame queue, GPU texture upload and
// release, and the control panel with its live gain value.

pub mod config;
pub mod error;
pub mod queue;
pub mod surface;
pub mod texture;

pub use config::ViewerConfig;
pub use error::ViewerError;
pub use queue::{FrameEntry, FrameQueue};
pub use surface::{DisplaySurface, GpuContext};
pub use texture::FrameTexture;

use std::time::Duration;

use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};

use crate::image::ImageFrame;

/// Lower bound of the gain slider
pub const GAIN_MIN: f32 = 0.0;

/// Upper bound of the gain slider
pub const GAIN_MAX: f32 = 2.0;

/// Interactive viewer for in-memory video frames
///
/// Displays submitted frames in labeled windows next to a control panel
/// with an adjustable gain value. The caller drives the loop:
///
/// ```no_run
/// use vidview_rs::image::ImageFrame;
/// use vidview_rs::viewer::{ImageViewer, ViewerConfig};
///
/// let mut viewer = ImageViewer::new(ViewerConfig::new()).unwrap();
/// while !viewer.poll_should_terminate() {
///     let frame = ImageFrame::from_bgr(4, 4, vec![0; 48]).unwrap();
///     viewer.submit_labeled("frame", &frame);
///     viewer.render().unwrap();
/// }
/// viewer.shutdown();
/// ```
pub struct ImageViewer {
    event_loop: EventLoop<()>,
    surface: DisplaySurface,
    frames: FrameQueue,
    gain: f32,
    skipped: Vec<String>,
}

impl ImageViewer {
    /// Create the viewer, its window, and the GPU context
    ///
    /// Initialization failures (no windowing subsystem, no graphics
    /// adapter) are fatal and surface as an error here.
    ///
    /// # Arguments
    /// * `config` - Window and rendering configuration
    ///
    /// # Returns
    /// Result containing the viewer or a fatal initialization error
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        let mut event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut surface = DisplaySurface::new(config);
        // The first pump delivers the resume event that creates the
        // window and GPU context
        event_loop.pump_app_events(Some(Duration::ZERO), &mut surface);

        if let Some(err) = surface.take_init_error() {
            return Err(err);
        }
        if !surface.is_initialized() {
            return Err(ViewerError::NotInitialized);
        }

        Ok(Self {
            event_loop,
            surface,
            frames: FrameQueue::new(),
            gain: 1.0,
            skipped: Vec::new(),
        })
    }

    /// Enqueue a frame for the next render with an auto-generated label
    ///
    /// The label is `image:<n>` where `n` counts the unlabeled submissions
    /// of the current cycle.
    pub fn submit(&mut self, frame: &ImageFrame) {
        self.frames.submit(frame);
    }

    /// Enqueue a frame for the next render under an explicit label
    pub fn submit_labeled<S: Into<String>>(&mut self, label: S, frame: &ImageFrame) {
        self.frames.submit_labeled(label, frame);
    }

    /// Pump pending window events and report whether a close/quit request
    /// has been observed
    ///
    /// Purely advisory: the caller's loop decides whether to stop invoking
    /// `render`. The viewer never terminates the loop on its own.
    pub fn poll_should_terminate(&mut self) -> bool {
        self.pump_events();
        self.surface.close_requested()
    }

    /// Execute one full render cycle
    ///
    /// Drains the frame queue, shows the control panel and one window per
    /// submitted frame, presents, and releases every GPU texture created
    /// for the cycle. An entry whose upload fails is skipped and recorded
    /// in `skipped_labels`; the rest of the cycle continues.
    pub fn render(&mut self) -> Result<(), ViewerError> {
        self.pump_events();

        self.surface.begin_frame()?;
        let ctx = self.surface.context().clone();

        self.show_main_panel(&ctx);

        let entries = self.frames.drain();
        self.skipped.clear();
        let mut textures = Vec::with_capacity(entries.len());
        {
            let gpu = self.surface.gpu_mut().ok_or(ViewerError::NotInitialized)?;
            for (index, entry) in entries.iter().enumerate() {
                let texture = match gpu.upload_frame(&entry.frame) {
                    Ok(texture) => texture,
                    Err(err) => {
                        eprintln!("Upload failed for \"{}\": {}", entry.label, err);
                        self.skipped.push(entry.label.clone());
                        continue;
                    }
                };

                let (width, height) = texture.size();
                // Per-index id keeps duplicate labels as distinct windows
                egui::Window::new(entry.label.as_str())
                    .id(egui::Id::new(("frame-window", index)))
                    .show(&ctx, |ui| {
                        ui.image((texture.id(), egui::vec2(width as f32, height as f32)));
                    });
                textures.push(texture);
            }
        }

        let result = self.surface.present();

        // Every texture from this cycle is released before any error from
        // the cycle propagates
        if let Some(gpu) = self.surface.gpu_mut() {
            for texture in textures {
                gpu.release_frame(texture);
            }
        }

        result
    }

    /// The live gain value, clamped to [GAIN_MIN, GAIN_MAX] by the panel
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Labels whose upload failed during the last render cycle
    pub fn skipped_labels(&self) -> &[String] {
        &self.skipped
    }

    /// The frames queued for the next render cycle
    pub fn queue(&self) -> &FrameQueue {
        &self.frames
    }

    /// Release all display resources
    ///
    /// Consumes the viewer, so this is necessarily the last call.
    pub fn shutdown(mut self) {
        self.surface.teardown();
    }

    /// Drain queued window events without blocking
    fn pump_events(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.surface);
        if let PumpStatus::Exit(_) = status {
            self.surface.request_close();
        }
    }

    /// Render the fixed control panel: gain slider and frame-time readout
    fn show_main_panel(&mut self, ctx: &egui::Context) {
        let gain = &mut self.gain;
        egui::Window::new("Main").show(ctx, |ui| {
            ui.add(
                egui::Slider::new(gain, GAIN_MIN..=GAIN_MAX)
                    .text("gain")
                    .fixed_decimals(3),
            );

            let dt = ctx.input(|i| i.stable_dt).max(f32::EPSILON);
            ui.label(format!("{:.3} ms/frame ({:.1} FPS)", dt * 1000.0, 1.0 / dt));
        });
    }
}
