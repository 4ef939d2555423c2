// Image frame - In-memory raster buffer shared with the viewer
//
// Frames use a 3-channel BGR layout, 8 bits per channel, with tightly
// packed rows. Pixel data sits behind an Arc so that submitting a frame
// to the viewer shares the buffer instead of deep-copying it.

use std::fmt;
use std::sync::Arc;

/// Bytes per pixel in the BGR layout
pub const BGR_BYTES_PER_PIXEL: usize = 3;

/// Bytes per pixel in the RGBA layout produced for upload
pub const RGBA_BYTES_PER_PIXEL: usize = 4;

/// Errors that can occur when constructing an image frame
#[derive(Debug)]
pub enum FrameError {
    /// Width or height is zero
    ZeroDimension { width: u32, height: u32 },

    /// Buffer length does not match width * height * 3
    LengthMismatch { expected: usize, found: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::ZeroDimension { width, height } => {
                write!(f, "Frame dimensions must be non-zero, got {}x{}", width, height)
            }
            FrameError::LengthMismatch { expected, found } => {
                write!(
                    f,
                    "Pixel buffer length mismatch: expected {} bytes, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// A caller-owned raster image in BGR8 layout
///
/// The viewer reads a frame synchronously during one render cycle and
/// drops its reference when the cycle ends. Cloning a frame clones the
/// Arc, not the pixels.
#[derive(Debug, Clone)]
pub struct ImageFrame {
    width: u32,
    height: u32,
    data: Arc<Vec<u8>>,
}

impl ImageFrame {
    /// Create a frame from a BGR8 pixel buffer
    ///
    /// # Arguments
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    /// * `data` - Pixel data, `width * height * 3` bytes, BGR order, row-major
    ///
    /// # Returns
    /// Result containing the frame, or an error if the dimensions are zero
    /// or the buffer length does not match
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension { width, height });
        }

        let expected = width as usize * height as usize * BGR_BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                found: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data: Arc::new(data),
        })
    }

    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw BGR pixel data
    pub fn as_bgr(&self) -> &[u8] {
        &self.data
    }

    /// Convert the frame to RGBA format for texture upload
    ///
    /// Swaps the blue and red channels and synthesizes a fully opaque
    /// alpha channel. The source frame is unmodified.
    ///
    /// # Arguments
    /// * `output` - Output buffer (must be at least `width * height * 4` bytes)
    ///
    /// # Panics
    /// Panics if the output buffer is too small
    pub fn to_rgba(&self, output: &mut [u8]) {
        let pixel_count = self.width as usize * self.height as usize;
        assert!(
            output.len() >= pixel_count * RGBA_BYTES_PER_PIXEL,
            "Output buffer too small for RGBA conversion"
        );

        for (src, dst) in self
            .data
            .chunks_exact(BGR_BYTES_PER_PIXEL)
            .zip(output.chunks_exact_mut(RGBA_BYTES_PER_PIXEL))
        {
            dst[0] = src[2]; // R
            dst[1] = src[1]; // G
            dst[2] = src[0]; // B
            dst[3] = 0xFF; // A
        }
    }

    /// Convert the frame to a freshly allocated RGBA buffer
    pub fn to_rgba_vec(&self) -> Vec<u8> {
        let pixel_count = self.width as usize * self.height as usize;
        let mut output = vec![0u8; pixel_count * RGBA_BYTES_PER_PIXEL];
        self.to_rgba(&mut output);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = ImageFrame::from_bgr(4, 4, vec![0; 4 * 4 * 3]).unwrap();
        assert_eq!(frame.dimensions(), (4, 4));
        assert_eq!(frame.as_bgr().len(), 48);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            ImageFrame::from_bgr(0, 4, vec![]),
            Err(FrameError::ZeroDimension { .. })
        ));
        assert!(matches!(
            ImageFrame::from_bgr(4, 0, vec![]),
            Err(FrameError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = ImageFrame::from_bgr(2, 2, vec![0; 5]).unwrap_err();
        match err {
            FrameError::LengthMismatch { expected, found } => {
                assert_eq!(expected, 12);
                assert_eq!(found, 5);
            }
            other => panic!("Unexpected error: {}", other),
        }
    }

    #[test]
    fn test_to_rgba_swaps_channels() {
        // One pixel: B=10, G=20, R=30
        let frame = ImageFrame::from_bgr(1, 1, vec![10, 20, 30]).unwrap();
        let rgba = frame.to_rgba_vec();
        assert_eq!(rgba, vec![30, 20, 10, 0xFF]);
    }

    #[test]
    fn test_to_rgba_black_is_opaque() {
        let frame = ImageFrame::from_bgr(4, 4, vec![0; 4 * 4 * 3]).unwrap();
        let rgba = frame.to_rgba_vec();
        assert_eq!(rgba.len(), 4 * 4 * 4);
        for pixel in rgba.chunks_exact(4) {
            assert_eq!(pixel, &[0, 0, 0, 0xFF]);
        }
    }

    #[test]
    #[should_panic(expected = "Output buffer too small")]
    fn test_to_rgba_output_too_small() {
        let frame = ImageFrame::from_bgr(2, 2, vec![0; 12]).unwrap();
        let mut output = vec![0u8; 8];
        frame.to_rgba(&mut output);
    }

    #[test]
    fn test_clone_shares_pixels() {
        let frame = ImageFrame::from_bgr(2, 2, vec![7; 12]).unwrap();
        let clone = frame.clone();
        assert!(std::ptr::eq(frame.as_bgr(), clone.as_bgr()));
    }
}
