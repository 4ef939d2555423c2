// Frame texture - One uploaded image as a device-resident texture
//
// A texture lives for exactly one render cycle: upload, draw, release.
// `release` consumes the value, so a texture cannot be freed twice, and
// the UI registration is always removed before the device texture is
// destroyed.

use crate::image::ImageFrame;

use super::error::ViewerError;

/// A device-resident texture created from one image frame
pub struct FrameTexture {
    texture: wgpu::Texture,
    id: egui::TextureId,
    width: u32,
    height: u32,
}

impl FrameTexture {
    /// Upload an image frame to the device
    ///
    /// Creates an RGBA8 texture sized to the frame, converts the BGR pixel
    /// data to RGBA with a fully opaque alpha channel, writes it to the
    /// device, and registers the texture with the UI renderer. The source
    /// frame is read-only.
    ///
    /// # Arguments
    /// * `device` - The graphics device
    /// * `queue` - The device submission queue
    /// * `renderer` - The UI renderer that will draw the texture
    /// * `frame` - The image to upload
    ///
    /// # Returns
    /// Result containing the texture, or an error if the frame exceeds the
    /// device texture size limit
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        renderer: &mut egui_wgpu::Renderer,
        frame: &ImageFrame,
    ) -> Result<Self, ViewerError> {
        let (width, height) = frame.dimensions();

        let max = device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(ViewerError::TextureTooLarge { width, height, max });
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame-texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let rgba = frame.to_rgba_vec();
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let id = renderer.register_native_texture(device, &view, wgpu::FilterMode::Linear);

        Ok(Self {
            texture,
            id,
            width,
            height,
        })
    }

    /// The UI texture handle for the draw call
    ///
    /// Valid only until `release` is invoked.
    pub fn id(&self) -> egui::TextureId {
        self.id
    }

    /// Dimensions as used at upload time, (width, height)
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Unregister from the UI renderer and destroy the device texture
    pub fn release(self, renderer: &mut egui_wgpu::Renderer) {
        renderer.free_texture(&self.id);
        self.texture.destroy();
    }
}
