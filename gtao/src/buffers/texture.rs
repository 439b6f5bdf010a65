use glam::UVec2;
use log::debug;

#[derive(Debug)]
pub struct Texture {
    tex: wgpu::Texture,
    view: wgpu::TextureView,
    size: UVec2,
    format: wgpu::TextureFormat,
}

impl Texture {
    pub(crate) fn new(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        size: UVec2,
        format: wgpu::TextureFormat,
    ) -> Self {
        Self::mipped(device, label, size, 1, format)
    }

    /// Creates a texture with `mip_levels` levels; level 0 is `size` texels
    /// and each following level floor-halves the previous one.
    pub(crate) fn mipped(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        size: UVec2,
        mip_levels: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let label = label.as_ref();

        debug!(
            "Allocating texture `{label}`; size={:?}, mips={}, format={:?}",
            size, mip_levels, format,
        );

        assert!(size.x > 0);
        assert!(size.y > 0);

        let tex = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.x,
                height: size.y,
                depth_or_array_layers: 1,
            },
            mip_level_count: mip_levels,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = tex.create_view(&Default::default());

        Self {
            tex,
            view,
            size,
            format,
        }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// View over the whole mip chain.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// View over a single mip level; storage bindings address one level at
    /// a time.
    pub(crate) fn mip_view(&self, level: u32) -> wgpu::TextureView {
        self.tex.create_view(&wgpu::TextureViewDescriptor {
            base_mip_level: level,
            mip_level_count: Some(1),
            ..Default::default()
        })
    }

    /// One mip level of this texture, as a copy operand.
    pub(crate) fn image_copy(&self, level: u32) -> wgpu::ImageCopyTexture<'_> {
        wgpu::ImageCopyTexture {
            texture: &self.tex,
            mip_level: level,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        }
    }
}
