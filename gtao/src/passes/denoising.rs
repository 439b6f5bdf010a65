use glam::UVec2;

use crate::{
    align_up, gpu, DenoisingLevel, FrameBuffers, FrameGraph, Resource,
    Settings, Shaders, Texture,
};

/// Iteratively blurs the occlusion estimate without crossing depth
/// discontinuities; intermediate iterations ping-pong between the two
/// occlusion slots, the terminal one lands in the dedicated final buffer.
#[derive(Debug)]
pub struct DenoisingPass {
    layout: wgpu::BindGroupLayout,
    pipeline: wgpu::ComputePipeline,
    last_pipeline: wgpu::ComputePipeline,
}

impl DenoisingPass {
    pub fn new(
        device: &wgpu::Device,
        shaders: &Shaders,
        settings: &Settings,
    ) -> Self {
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("gtao_denoising_layout"),
                entries: &[
                    super::uniform_entry(0),
                    super::texture_entry(1, wgpu::TextureSampleType::Uint),
                    super::texture_entry(
                        2,
                        wgpu::TextureSampleType::Float { filterable: false },
                    ),
                    super::storage_entry(3, settings.ao_term_format()),
                ],
            });

        let pipeline = super::pipeline(
            device,
            "denoising",
            &layout,
            0,
            (&shaders.denoising, "denoise"),
        );

        let last_pipeline = super::pipeline(
            device,
            "denoising_last",
            &layout,
            0,
            (&shaders.denoising, "denoise_last"),
        );

        Self {
            layout,
            pipeline,
            last_pipeline,
        }
    }

    pub fn run(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        graph: &mut dyn FrameGraph,
        buffers: &FrameBuffers,
        level: DenoisingLevel,
        size: UVec2,
    ) {
        // Each thread covers two horizontal pixels, hence the doubled
        // alignment on X
        let groups_x =
            align_up(size.x, gpu::NUM_THREADS_X * 2) / gpu::NUM_THREADS_X;
        let groups_y = align_up(size.y, gpu::NUM_THREADS_Y) / gpu::NUM_THREADS_Y;

        for step in schedule(level.passes()) {
            let source = buffers.ao_term.get(step.source.alternate());

            graph.declare_read(step.source.resource());
            graph.declare_read(Resource::Edges);

            let (pipeline, target): (_, &Texture) = match step.target {
                Target::Final => {
                    graph.declare_write(Resource::FinalAoTerm);

                    (&self.last_pipeline, &buffers.final_ao_term)
                }
                Target::Slot(slot) => {
                    graph.declare_write(slot.resource());

                    (&self.pipeline, buffers.ao_term.get(slot.alternate()))
                }
            };

            let bind_group =
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("gtao_denoising_bind_group"),
                    layout: &self.layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: buffers.constants.as_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(
                                source.view(),
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::TextureView(
                                buffers.edges.view(),
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 3,
                            resource: wgpu::BindingResource::TextureView(
                                target.view(),
                            ),
                        },
                    ],
                });

            let mut pass =
                encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some("gtao_denoising_pass"),
                });

            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(groups_x, groups_y, 1);
        }
    }
}

/// Builds the read/write schedule for `configured` denoising iterations.
///
/// The loop always runs at least once; each iteration reads the slot the
/// previous one wrote, and the terminal iteration writes the dedicated
/// final buffer instead of the other slot.
pub(crate) fn schedule(configured: u32) -> Vec<DenoisingStep> {
    let count = configured.max(1);

    (0..count)
        .map(|index| {
            let source = if index % 2 == 0 { Slot::A } else { Slot::B };

            let target = if index == count - 1 {
                Target::Final
            } else {
                Target::Slot(source.other())
            };

            DenoisingStep { source, target }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DenoisingStep {
    pub source: Slot,
    pub target: Target,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    A,
    B,
}

impl Slot {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Index into the double-buffered occlusion term.
    pub fn alternate(self) -> bool {
        matches!(self, Self::B)
    }

    pub fn resource(self) -> Resource {
        match self {
            Self::A => Resource::AoTerm,
            Self::B => Resource::AoTermPong,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    Slot(Slot),
    Final,
}
