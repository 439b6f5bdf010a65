mod buffers;
mod camera;
mod frame;
mod graph;
mod passes;
mod settings;
mod utils;

use glam::Vec2;
use log::info;

pub use gtao_gpu as gpu;

pub use self::buffers::Texture;
pub(crate) use self::buffers::{DoubleBuffered, MappedUniformBuffer};
pub use self::camera::*;
pub(crate) use self::frame::*;
pub use self::graph::*;
pub(crate) use self::passes::*;
pub use self::settings::*;
pub(crate) use self::utils::*;

/// Frame index fed into the constants derivation.
///
/// Temporal noise rotation is disabled for now; every frame samples with the
/// same rotation, which keeps the output stable without an accumulation
/// stage on top.
const FRAME_INDEX: u32 = 0;

/// The four compute-kernel modules, loaded by the host.
///
/// Expected entry points: `prefilter_depths`; `main_occlusion_low` /
/// `_medium` / `_high` / `_ultra`; `denoise` and `denoise_last`;
/// `composite`.
#[derive(Debug)]
pub struct Shaders {
    pub prefilter_depths: wgpu::ShaderModule,
    pub main_occlusion: wgpu::ShaderModule,
    pub denoising: wgpu::ShaderModule,
    pub composition: wgpu::ShaderModule,
}

#[derive(Debug)]
pub struct Engine {
    settings: Settings,
    passes: Passes,
}

impl Engine {
    /// Builds every pipeline up front; from here on, recording a frame
    /// allocates only frame-scoped resources.
    ///
    /// The device needs `Features::PUSH_CONSTANTS`.
    pub fn new(
        device: &wgpu::Device,
        shaders: &Shaders,
        settings: Settings,
    ) -> Self {
        info!("Initializing engine; settings={:?}", settings);

        let passes = Passes::new(device, shaders, &settings);

        Self { settings, passes }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Records one frame's worth of dispatches into `encoder`.
    ///
    /// `depth` and `normals` are the host's geometry-stage outputs at render
    /// resolution; `modifiers` are this frame's optional overrides. Every
    /// intermediate buffer is allocated here and dies with this call - only
    /// the published [`Output`] survives.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        graph: &mut dyn FrameGraph,
        camera: &Camera,
        depth: &wgpu::TextureView,
        normals: &wgpu::TextureView,
        modifiers: Option<&Modifiers>,
    ) -> Output {
        let settings = self.settings.resolved(modifiers);
        let intensity = modifiers.map_or(1.0, Modifiers::intensity);

        let size = camera.working_size(settings.resolution_scale);
        let constants = camera.serialize(&settings, size, FRAME_INDEX);

        let buffers = FrameBuffers::new(
            device,
            queue,
            &settings,
            camera.viewport,
            size,
            constants,
        );

        self.passes
            .prefilter_depths
            .run(device, encoder, graph, &buffers, depth, size);

        self.passes.main_occlusion.run(
            device,
            encoder,
            graph,
            &buffers,
            normals,
            settings.quality_level,
            size,
        );

        self.passes.denoising.run(
            device,
            encoder,
            graph,
            &buffers,
            settings.denoising_level,
            size,
        );

        let resolution_scale = size.as_vec2() / camera.viewport.as_vec2();

        self.passes.composition.run(
            device,
            encoder,
            graph,
            &buffers,
            camera.viewport,
            resolution_scale,
            intensity,
        );

        Output {
            ao_final: buffers.ao_final,
            resolution_scale,
            direct_lighting_strength: settings.direct_lighting_strength,
        }
    }
}

/// Results handed back to the host after a frame was recorded; the host
/// applies them to its rendering state for the lighting stage to consume.
#[derive(Debug)]
pub struct Output {
    /// Occlusion resolved to render resolution; `R8Unorm` scalar, or
    /// `R32Uint` with a bent normal packed alongside the occlusion.
    pub ao_final: Texture,
    /// Working-to-render resolution ratio.
    pub resolution_scale: Vec2,
    /// Forwarded unchanged, for the lighting stage's ambient term.
    pub direct_lighting_strength: f32,
}
