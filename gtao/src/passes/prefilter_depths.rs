use glam::UVec2;

use crate::{
    align_up, gpu, mip_size, FrameBuffers, FrameGraph, Resource, Settings,
    Shaders,
};

/// Builds the five-level depth pyramid out of the raw depth buffer.
#[derive(Debug)]
pub struct PrefilterDepthsPass {
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    pipeline: wgpu::ComputePipeline,
}

impl PrefilterDepthsPass {
    pub fn new(device: &wgpu::Device, shaders: &Shaders, _: &Settings) -> Self {
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("gtao_prefilter_depths_layout"),
                entries: &[
                    super::uniform_entry(0),
                    super::texture_entry(1, wgpu::TextureSampleType::Depth),
                    super::sampler_entry(2),
                    super::storage_entry(3, wgpu::TextureFormat::R32Float),
                    super::storage_entry(4, wgpu::TextureFormat::R32Float),
                    super::storage_entry(5, wgpu::TextureFormat::R32Float),
                    super::storage_entry(6, wgpu::TextureFormat::R32Float),
                    super::storage_entry(7, wgpu::TextureFormat::R32Float),
                ],
            });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gtao_prefilter_depths_sampler"),
            ..Default::default()
        });

        let pipeline = super::pipeline(
            device,
            "prefilter_depths",
            &layout,
            0,
            (&shaders.prefilter_depths, "prefilter_depths"),
        );

        Self {
            layout,
            sampler,
            pipeline,
        }
    }

    pub fn run(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        graph: &mut dyn FrameGraph,
        buffers: &FrameBuffers,
        depth: &wgpu::TextureView,
        size: UVec2,
    ) {
        graph.declare_read(Resource::RawDepth);
        graph.declare_write(Resource::DepthPyramid);

        // The kernel writes the full-size level straight into the pyramid's
        // top; the four smaller levels land in standalone targets first
        let level0 = buffers.depth_pyramid.mip_view(0);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gtao_prefilter_depths_bind_group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffers.constants.as_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(depth),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&level0),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::TextureView(
                        buffers.depth_levels[0].view(),
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: wgpu::BindingResource::TextureView(
                        buffers.depth_levels[1].view(),
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 6,
                    resource: wgpu::BindingResource::TextureView(
                        buffers.depth_levels[2].view(),
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 7,
                    resource: wgpu::BindingResource::TextureView(
                        buffers.depth_levels[3].view(),
                    ),
                },
            ],
        });

        let group_size = gpu::PREFILTER_GROUP_SIZE;
        let groups_x = align_up(size.x, group_size) / group_size;
        let groups_y = align_up(size.y, group_size) / group_size;

        {
            let mut pass =
                encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some("gtao_prefilter_depths_pass"),
                });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(groups_x, groups_y, 1);
        }

        // Materialize the standalone levels into the pyramid's mip slots, so
        // the occlusion stage can address the whole pyramid through one
        // handle with native mip addressing
        for (index, level) in buffers.depth_levels.iter().enumerate() {
            let mip = index as u32 + 1;
            let extent = mip_size(size, mip);

            encoder.copy_texture_to_texture(
                level.image_copy(0),
                buffers.depth_pyramid.image_copy(mip),
                wgpu::Extent3d {
                    width: extent.x,
                    height: extent.y,
                    depth_or_array_layers: 1,
                },
            );
        }
    }
}
