use glam::UVec2;
use log::debug;

use crate::{
    gpu, mip_size, DoubleBuffered, MappedUniformBuffer, Settings, Texture,
};

/// Transient resources owned by a single [`crate::Engine::record()`]
/// invocation; everything except the published output dies with the frame.
#[derive(Debug)]
pub struct FrameBuffers {
    pub constants: MappedUniformBuffer<gpu::GtaoConstants>,
    /// Five-level prefiltered depth; later stages address it by
    /// `(handle, level)`.
    pub depth_pyramid: Texture,
    /// Standalone targets for levels 1..=4, copied into the pyramid's mip
    /// slots right after the prefiltering dispatch.
    pub depth_levels: [Texture; 4],
    /// Slot A is the occlusion estimate, slot B its ping-pong counterpart
    /// for intermediate denoising iterations.
    pub ao_term: DoubleBuffered<Texture>,
    pub edges: Texture,
    pub final_ao_term: Texture,
    pub ao_final: Texture,
}

impl FrameBuffers {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        settings: &Settings,
        viewport: UVec2,
        size: UVec2,
        constants: gpu::GtaoConstants,
    ) -> Self {
        debug!("Initializing frame buffers; size={:?}", size);

        let mut constants =
            MappedUniformBuffer::new(device, "gtao_constants", constants);

        constants.flush(queue);

        let depth_pyramid = Texture::mipped(
            device,
            "gtao_depth_pyramid",
            size,
            gpu::DEPTH_MIP_LEVELS,
            wgpu::TextureFormat::R32Float,
        );

        let depth_levels = [1, 2, 3, 4].map(|level| {
            Texture::new(
                device,
                format!("gtao_depth_level_{level}"),
                mip_size(size, level),
                wgpu::TextureFormat::R32Float,
            )
        });

        let ao_term = DoubleBuffered::new(
            device,
            "gtao_ao_term",
            size,
            settings.ao_term_format(),
        );

        let edges = Texture::new(
            device,
            "gtao_edges",
            size,
            wgpu::TextureFormat::R8Unorm,
        );

        let final_ao_term = Texture::new(
            device,
            "gtao_final_ao_term",
            size,
            settings.ao_term_format(),
        );

        let ao_final = Texture::new(
            device,
            "gtao_ao_final",
            viewport,
            settings.ao_final_format(),
        );

        Self {
            constants,
            depth_pyramid,
            depth_levels,
            ao_term,
            edges,
            final_ao_term,
            ao_final,
        }
    }
}
