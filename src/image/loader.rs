// Image loading - Decode image files into viewer frames
//
// Reads a PNG from disk and converts it to the viewer's BGR frame layout.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;

use super::frame::{FrameError, ImageFrame};

/// Errors that can occur while loading an image file
#[derive(Debug)]
pub enum LoadError {
    /// I/O error
    Io(io::Error),

    /// PNG decoding error
    Decoding(png::DecodingError),

    /// Color type the viewer cannot convert
    UnsupportedColorType(png::ColorType),

    /// Decoded data did not form a valid frame
    Frame(FrameError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {}", e),
            LoadError::Decoding(e) => write!(f, "PNG decoding error: {}", e),
            LoadError::UnsupportedColorType(c) => {
                write!(f, "Unsupported PNG color type: {:?}", c)
            }
            LoadError::Frame(e) => write!(f, "Invalid frame data: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<png::DecodingError> for LoadError {
    fn from(e: png::DecodingError) -> Self {
        LoadError::Decoding(e)
    }
}

impl From<FrameError> for LoadError {
    fn from(e: FrameError) -> Self {
        LoadError::Frame(e)
    }
}

/// Load a PNG file as a BGR image frame
///
/// RGB, RGBA, grayscale, and grayscale-alpha images are converted to the
/// viewer's BGR layout; palette and 16-bit images are normalized to 8-bit
/// color first. Alpha channels are discarded (frames carry no alpha).
///
/// # Arguments
/// * `path` - Path to the PNG file
///
/// # Returns
/// Result containing the decoded frame or an error
pub fn load_png<P: AsRef<Path>>(path: P) -> Result<ImageFrame, LoadError> {
    let file = BufReader::new(File::open(path)?);
    let mut decoder = png::Decoder::new(file);
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder.read_info()?;
    let (width, height) = {
        let header = reader.info();
        (header.width, header.height)
    };

    // Normalized output is at most 4 bytes per pixel (RGBA8)
    let mut buf = vec![0u8; width as usize * height as usize * 4];
    let info = reader.next_frame(&mut buf)?;
    let pixels = &buf[..info.buffer_size()];

    let expected = info.width as usize * info.height as usize * 3;
    let mut bgr = Vec::with_capacity(expected);
    match info.color_type {
        png::ColorType::Rgb => {
            for px in pixels.chunks_exact(3) {
                bgr.extend_from_slice(&[px[2], px[1], px[0]]);
            }
        }
        png::ColorType::Rgba => {
            for px in pixels.chunks_exact(4) {
                bgr.extend_from_slice(&[px[2], px[1], px[0]]);
            }
        }
        png::ColorType::Grayscale => {
            for &gray in pixels {
                bgr.extend_from_slice(&[gray, gray, gray]);
            }
        }
        png::ColorType::GrayscaleAlpha => {
            for px in pixels.chunks_exact(2) {
                bgr.extend_from_slice(&[px[0], px[0], px[0]]);
            }
        }
        other => return Err(LoadError::UnsupportedColorType(other)),
    }

    Ok(ImageFrame::from_bgr(info.width, info.height, bgr)?)
}
