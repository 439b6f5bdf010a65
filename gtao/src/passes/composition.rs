use std::mem;

use glam::{UVec2, Vec2};

use crate::{
    align_up, gpu, FrameBuffers, FrameGraph, Resource, Settings, Shaders,
};

/// Resolves the denoised occlusion term to render resolution, applying the
/// intensity and resolution-scale correction.
#[derive(Debug)]
pub struct CompositionPass {
    layout: wgpu::BindGroupLayout,
    pipeline: wgpu::ComputePipeline,
}

impl CompositionPass {
    pub fn new(
        device: &wgpu::Device,
        shaders: &Shaders,
        settings: &Settings,
    ) -> Self {
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("gtao_composition_layout"),
                entries: &[
                    super::uniform_entry(0),
                    super::texture_entry(1, wgpu::TextureSampleType::Uint),
                    super::storage_entry(2, settings.ao_final_format()),
                ],
            });

        let pipeline = super::pipeline(
            device,
            "composition",
            &layout,
            mem::size_of::<gpu::CompositionPassParams>(),
            (&shaders.composition, "composite"),
        );

        Self { layout, pipeline }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        graph: &mut dyn FrameGraph,
        buffers: &FrameBuffers,
        viewport: UVec2,
        resolution_scale: Vec2,
        intensity: f32,
    ) {
        graph.declare_read(Resource::FinalAoTerm);
        graph.declare_write(Resource::AoFinal);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gtao_composition_bind_group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffers.constants.as_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(
                        buffers.final_ao_term.view(),
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(
                        buffers.ao_final.view(),
                    ),
                },
            ],
        });

        // The output covers the full render resolution; the kernel rescales
        // its coordinates to address the working-resolution term
        let groups_x =
            align_up(viewport.x, gpu::NUM_THREADS_X) / gpu::NUM_THREADS_X;
        let groups_y =
            align_up(viewport.y, gpu::NUM_THREADS_Y) / gpu::NUM_THREADS_Y;

        let mut pass =
            encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("gtao_composition_pass"),
            });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);

        pass.set_push_constants(
            0,
            bytemuck::bytes_of(&gpu::CompositionPassParams::new(
                resolution_scale,
                intensity,
            )),
        );

        pass.dispatch_workgroups(groups_x, groups_y, 1);
    }
}
