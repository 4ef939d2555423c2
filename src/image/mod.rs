// Image module - Frame buffers consumed by the viewer
//
// This module provides:
// - BGR8 image frames with shared pixel storage
// - BGR to RGBA conversion for texture upload
// - PNG file loading into the frame layout

pub mod frame;
pub mod loader;

pub use frame::{FrameError, ImageFrame, BGR_BYTES_PER_PIXEL, RGBA_BYTES_PER_PIXEL};
pub use loader::{load_png, LoadError};
