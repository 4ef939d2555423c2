// Video Frame Viewer Library
// Core library for the interactive frame viewer implementation

// Public modules
pub mod image;
pub mod viewer;

// Re-export main types for convenience
pub use image::{load_png, FrameError, ImageFrame, LoadError};
pub use viewer::{
    DisplaySurface, FrameEntry, FrameQueue, FrameTexture, ImageViewer, ViewerConfig, ViewerError,
};
