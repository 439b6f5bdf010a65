use glam::UVec2;

use crate::{
    align_up, gpu, FrameBuffers, FrameGraph, QualityLevel, Resource, Settings,
    Shaders,
};

/// One entry point per quality tier, in kernel-index order.
pub(crate) const ENTRY_POINTS: [&str; 4] = [
    "main_occlusion_low",
    "main_occlusion_medium",
    "main_occlusion_high",
    "main_occlusion_ultra",
];

/// Estimates raw occlusion and per-pixel edge weights at working
/// resolution.
#[derive(Debug)]
pub struct MainOcclusionPass {
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    pipelines: [wgpu::ComputePipeline; 4],
}

impl MainOcclusionPass {
    pub fn new(
        device: &wgpu::Device,
        shaders: &Shaders,
        settings: &Settings,
    ) -> Self {
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("gtao_main_occlusion_layout"),
                entries: &[
                    super::uniform_entry(0),
                    super::texture_entry(
                        1,
                        wgpu::TextureSampleType::Float { filterable: false },
                    ),
                    super::sampler_entry(2),
                    super::texture_entry(
                        3,
                        wgpu::TextureSampleType::Float { filterable: false },
                    ),
                    super::storage_entry(4, settings.ao_term_format()),
                    super::storage_entry(5, wgpu::TextureFormat::R8Unorm),
                ],
            });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gtao_main_occlusion_sampler"),
            ..Default::default()
        });

        let pipelines = ENTRY_POINTS.map(|entry_point| {
            super::pipeline(
                device,
                "main_occlusion",
                &layout,
                0,
                (&shaders.main_occlusion, entry_point),
            )
        });

        Self {
            layout,
            sampler,
            pipelines,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        graph: &mut dyn FrameGraph,
        buffers: &FrameBuffers,
        normals: &wgpu::TextureView,
        quality: QualityLevel,
        size: UVec2,
    ) {
        graph.declare_read(Resource::DepthPyramid);
        graph.declare_read(Resource::RawNormals);
        graph.declare_write(Resource::AoTerm);
        graph.declare_write(Resource::Edges);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gtao_main_occlusion_bind_group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffers.constants.as_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(
                        buffers.depth_pyramid.view(),
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(normals),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::TextureView(
                        buffers.ao_term.get(false).view(),
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: wgpu::BindingResource::TextureView(
                        buffers.edges.view(),
                    ),
                },
            ],
        });

        let groups_x = align_up(size.x, gpu::NUM_THREADS_X) / gpu::NUM_THREADS_X;
        let groups_y = align_up(size.y, gpu::NUM_THREADS_Y) / gpu::NUM_THREADS_Y;

        let mut pass =
            encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("gtao_main_occlusion_pass"),
            });

        pass.set_pipeline(&self.pipelines[quality.index()]);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(groups_x, groups_y, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_are_distinct() {
        for (index, entry_point) in ENTRY_POINTS.iter().enumerate() {
            assert_eq!(
                index,
                ENTRY_POINTS
                    .iter()
                    .position(|other| other == entry_point)
                    .unwrap(),
            );
        }
    }

    #[test]
    fn quality_selects_matching_kernel() {
        assert_eq!(
            "main_occlusion_low",
            ENTRY_POINTS[QualityLevel::Low.index()]
        );
        assert_eq!(
            "main_occlusion_ultra",
            ENTRY_POINTS[QualityLevel::Ultra.index()]
        );
    }
}
