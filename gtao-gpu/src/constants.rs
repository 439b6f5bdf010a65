use bytemuck::{Pod, Zeroable};
use glam::{IVec2, Vec2, Vec3};

/// Uniform constant buffer consumed by all four kernels.
///
/// Derived from the camera projection and the resolved settings once per
/// frame; immutable for the rest of the frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct GtaoConstants {
    pub viewport_size: IVec2,
    pub viewport_pixel_size: Vec2,
    pub depth_unpack_consts: Vec2,
    pub camera_tan_half_fov: Vec2,
    pub ndc_to_view_mul: Vec2,
    pub ndc_to_view_add: Vec2,
    pub ndc_to_view_mul_x_pixel_size: Vec2,
    pub effect_radius: f32,
    pub effect_falloff_range: f32,
    pub radius_multiplier: f32,
    pub sample_distribution_power: f32,
    pub thin_occluder_compensation: f32,
    pub final_value_power: f32,
    pub depth_mip_sampling_offset: f32,
    pub noise_index: u32,
    pub denoise_blur_beta: f32,
    pub direct_lighting_strength: f32,
    pub bent_normals: u32,
    pub padding: [u32; 3],
}

impl GtaoConstants {
    /// Converts a raw depth-buffer sample into linear view-space depth.
    pub fn linearize_depth(&self, raw: f32) -> f32 {
        self.depth_unpack_consts.x / (self.depth_unpack_consts.y - raw)
    }

    /// Given screen-space UV and a linear depth, returns the view-space
    /// position; the view-space Z axis points away from the camera here.
    pub fn screen_to_view(&self, uv: Vec2, view_depth: f32) -> Vec3 {
        ((self.ndc_to_view_mul * uv + self.ndc_to_view_add) * view_depth)
            .extend(view_depth)
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use approx::assert_relative_eq;
    use glam::vec2;

    use super::*;

    /// The struct is bound as a uniform buffer; its layout must stay
    /// 16-byte-sized so every backend agrees on the field offsets.
    #[test]
    fn layout() {
        assert_eq!(112, mem::size_of::<GtaoConstants>());
        assert_eq!(0, mem::size_of::<GtaoConstants>() % 16);
    }

    #[test]
    fn screen_to_view() {
        let target = GtaoConstants {
            ndc_to_view_mul: vec2(2.0, -2.0),
            ndc_to_view_add: vec2(-1.0, 1.0),
            ..Default::default()
        };

        // The screen's center lays on the camera's forward axis
        let pos = target.screen_to_view(vec2(0.5, 0.5), 10.0);

        assert_relative_eq!(pos.x, 0.0);
        assert_relative_eq!(pos.y, 0.0);
        assert_relative_eq!(pos.z, 10.0);

        // ... and the top-left corner maps to negative X, positive Y
        let pos = target.screen_to_view(vec2(0.0, 0.0), 10.0);

        assert_relative_eq!(pos.x, -10.0);
        assert_relative_eq!(pos.y, 10.0);
    }
}
