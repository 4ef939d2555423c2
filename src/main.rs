// Video Frame Viewer - Main Entry Point
//
// This is a demonstration of the display loop with a synthetic animated
// test pattern standing in for a live capture source: each iteration
// generates a frame, scales it by the live gain value, downsamples it,
// and shows half- and quarter-size copies in labeled windows.

use vidview_rs::image::ImageFrame;
use vidview_rs::viewer::{ImageViewer, ViewerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Video Frame Viewer (vidview-rs) v0.1.0");
    println!("======================================");
    println!();

    // Load or create viewer configuration
    let config_path = "viewer_config.toml";
    let config = ViewerConfig::load_or_default(config_path);
    println!("Viewer configuration loaded from '{}'", config_path);
    println!();

    let mut viewer = ImageViewer::new(config)?;

    println!("Press the close button to exit.");
    println!();

    // Main loop
    let mut tick: u32 = 0;
    while !viewer.poll_should_terminate() {
        let frame = test_pattern(640, 480, tick);

        // Gain is read back from the panel and applied upstream
        let frame = apply_gain(&frame, viewer.gain());

        let half = downscale(&frame);
        let quarter = downscale(&half);

        viewer.submit_labeled("half", &half);
        viewer.submit_labeled("quarter", &quarter);
        viewer.render()?;

        tick = tick.wrapping_add(1);
    }

    viewer.shutdown();
    println!("Viewer window closed.");
    Ok(())
}

/// Generate an animated BGR test pattern
fn test_pattern(width: u32, height: u32, tick: u32) -> ImageFrame {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            let b = (x.wrapping_add(tick) & 0xFF) as u8;
            let g = (y.wrapping_add(tick / 2) & 0xFF) as u8;
            let r = ((x ^ y) & 0xFF) as u8;
            data.extend_from_slice(&[b, g, r]);
        }
    }
    ImageFrame::from_bgr(width, height, data).expect("pattern dimensions are valid")
}

/// Scale pixel intensity by the gain value, saturating at 255
fn apply_gain(frame: &ImageFrame, gain: f32) -> ImageFrame {
    let data = frame
        .as_bgr()
        .iter()
        .map(|&value| (value as f32 * gain).round().clamp(0.0, 255.0) as u8)
        .collect();
    ImageFrame::from_bgr(frame.width(), frame.height(), data)
        .expect("gain preserves dimensions")
}

/// Halve both dimensions with a 2x2 box filter
fn downscale(frame: &ImageFrame) -> ImageFrame {
    let (width, height) = frame.dimensions();
    let out_width = (width / 2).max(1);
    let out_height = (height / 2).max(1);
    let src = frame.as_bgr();
    let stride = width as usize * 3;

    let mut data = Vec::with_capacity(out_width as usize * out_height as usize * 3);
    for y in 0..out_height as usize {
        for x in 0..out_width as usize {
            let x0 = x * 2;
            let y0 = y * 2;
            // Clamp the 2x2 window inside odd-sized frames
            let x1 = (x0 + 1).min(width as usize - 1);
            let y1 = (y0 + 1).min(height as usize - 1);
            for channel in 0..3 {
                let sum = src[y0 * stride + x0 * 3 + channel] as u32
                    + src[y0 * stride + x1 * 3 + channel] as u32
                    + src[y1 * stride + x0 * 3 + channel] as u32
                    + src[y1 * stride + x1 * 3 + channel] as u32;
                data.push((sum / 4) as u8);
            }
        }
    }
    ImageFrame::from_bgr(out_width, out_height, data).expect("downscale preserves layout")
}
