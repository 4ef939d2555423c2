// Viewer errors
//
// Fatal initialization failures and per-cycle rendering failures share one
// error type so callers see a single Result surface.

use std::fmt;

/// Errors that can occur while creating or driving the viewer
#[derive(Debug)]
pub enum ViewerError {
    /// Event loop creation failed
    EventLoop(winit::error::EventLoopError),

    /// Native window creation failed
    WindowCreation(winit::error::OsError),

    /// Rendering surface creation failed
    CreateSurface(wgpu::CreateSurfaceError),

    /// No suitable graphics adapter was found
    RequestAdapter(wgpu::RequestAdapterError),

    /// Logical graphics device creation failed
    RequestDevice(wgpu::RequestDeviceError),

    /// Swap chain frame acquisition failed fatally
    Surface(wgpu::SurfaceError),

    /// Image exceeds the device texture size limit
    TextureTooLarge { width: u32, height: u32, max: u32 },

    /// The display surface never came up
    NotInitialized,
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            ViewerError::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            ViewerError::CreateSurface(e) => write!(f, "Surface creation failed: {}", e),
            ViewerError::RequestAdapter(e) => write!(f, "No graphics adapter: {}", e),
            ViewerError::RequestDevice(e) => write!(f, "Device creation failed: {}", e),
            ViewerError::Surface(e) => write!(f, "Surface error: {}", e),
            ViewerError::TextureTooLarge { width, height, max } => {
                write!(
                    f,
                    "Image {}x{} exceeds the device texture limit of {}",
                    width, height, max
                )
            }
            ViewerError::NotInitialized => {
                write!(f, "Display surface is not initialized")
            }
        }
    }
}

impl std::error::Error for ViewerError {}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::WindowCreation(e)
    }
}

impl From<wgpu::CreateSurfaceError> for ViewerError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        ViewerError::CreateSurface(e)
    }
}

impl From<wgpu::RequestAdapterError> for ViewerError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        ViewerError::RequestAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for ViewerError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        ViewerError::RequestDevice(e)
    }
}
