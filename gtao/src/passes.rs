use std::ops::Range;

use log::debug;

use crate::{Settings, Shaders};

macro_rules! passes {
    ([ $( $name:ident => $class:ident, )* ]) => {
        $( mod $name; )*
        $( pub use self::$name::*; )*

        #[derive(Debug)]
        pub struct Passes {
            $( pub $name: $class, )*
        }

        impl Passes {
            pub fn new(
                device: &wgpu::Device,
                shaders: &Shaders,
                settings: &Settings,
            ) -> Self {
                debug!("Initializing passes");

                Self {
                    $( $name: $class::new(device, shaders, settings), )*
                }
            }
        }
    };
}

passes!([
    prefilter_depths => PrefilterDepthsPass,
    main_occlusion => MainOcclusionPass,
    denoising => DenoisingPass,
    composition => CompositionPass,
]);

pub(crate) fn pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    push_constants: usize,
    (module, entry_point): (&wgpu::ShaderModule, &str),
) -> wgpu::ComputePipeline {
    debug!("Initializing pipeline: {label}:{entry_point}");

    let push_constant_ranges = if push_constants > 0 {
        vec![wgpu::PushConstantRange {
            stages: wgpu::ShaderStages::COMPUTE,
            range: Range {
                start: 0,
                end: push_constants as u32,
            },
        }]
    } else {
        vec![]
    };

    let pipeline_layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("gtao_{label}_pipeline_layout")),
            bind_group_layouts: &[layout],
            push_constant_ranges: &push_constant_ranges,
        });

    device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some(&format!("gtao_{label}_pipeline")),
        layout: Some(&pipeline_layout),
        module,
        entry_point,
    })
}

pub(crate) fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub(crate) fn texture_entry(
    binding: u32,
    sample_type: wgpu::TextureSampleType,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Texture {
            sample_type,
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

pub(crate) fn storage_entry(
    binding: u32,
    format: wgpu::TextureFormat,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::StorageTexture {
            access: wgpu::StorageTextureAccess::WriteOnly,
            format,
            view_dimension: wgpu::TextureViewDimension::D2,
        },
        count: None,
    }
}

pub(crate) fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
        count: None,
    }
}
