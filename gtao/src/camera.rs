use glam::{vec2, vec3, Mat4, UVec2};

use crate::{gpu, ResolutionScale, Settings};

/// The kernels were written against column-vector matrices; a host feeding
/// row-vector data would flip this instead of transposing on its side.
const ROW_MAJOR: bool = false;

/// Per-frame camera state, sampled by the host right before recording.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Projection matrix following the wgpu convention: column vectors,
    /// right-handed view space looking down -Z, clip depth in `0..=1`.
    /// Reversed-Z projections work too.
    pub projection: Mat4,
    /// Scaled viewport, in pixels.
    pub viewport: UVec2,
}

impl Camera {
    /// Resolution the occlusion is computed at; never zero in either axis.
    pub fn working_size(&self, scale: ResolutionScale) -> UVec2 {
        (self.viewport / scale.factor()).max(UVec2::ONE)
    }

    /// Derives the constants consumed by all four kernels.
    ///
    /// Runs every frame - both the projection and the working resolution
    /// may change between frames, so nothing here is cached.
    pub(crate) fn serialize(
        &self,
        settings: &Settings,
        size: UVec2,
        frame: u32,
    ) -> gpu::GtaoConstants {
        // The kernels expect view-space depth growing away from the camera,
        // so flip the forward axis before reading the depth terms out of the
        // matrix
        let projection = self.projection * Mat4::from_scale(vec3(1.0, 1.0, -1.0));

        let projection = if ROW_MAJOR {
            projection.transpose()
        } else {
            projection
        };

        let depth_linearize_mul = -projection.w_axis.z;
        let mut depth_linearize_add = projection.z_axis.z;

        if depth_linearize_mul * depth_linearize_add < 0.0 {
            depth_linearize_add = -depth_linearize_add;
        }

        let tan_half_fov =
            vec2(1.0 / projection.x_axis.x, 1.0 / projection.y_axis.y);

        let viewport_pixel_size =
            vec2(1.0 / size.x as f32, 1.0 / size.y as f32);

        // Maps screen-space UV (Y down) onto the view-space frustum slice at
        // unit depth
        let ndc_to_view_mul = vec2(tan_half_fov.x * 2.0, tan_half_fov.y * -2.0);
        let ndc_to_view_add = vec2(-tan_half_fov.x, tan_half_fov.y);

        let noise_index = if settings.denoising_level.passes() > 0 {
            frame % gpu::NOISE_FRAME_COUNT
        } else {
            0
        };

        // A huge beta neutralizes the blur when denoising is disabled; the
        // loop still runs its mandatory single pass
        let denoise_blur_beta = if settings.denoising_level.passes() == 0 {
            1e4
        } else {
            1.2
        };

        gpu::GtaoConstants {
            viewport_size: size.as_ivec2(),
            viewport_pixel_size,
            depth_unpack_consts: vec2(depth_linearize_mul, depth_linearize_add),
            camera_tan_half_fov: tan_half_fov,
            ndc_to_view_mul,
            ndc_to_view_add,
            ndc_to_view_mul_x_pixel_size: ndc_to_view_mul * viewport_pixel_size,
            effect_radius: settings.radius,
            effect_falloff_range: settings.falloff_range,
            radius_multiplier: settings.radius_multiplier,
            sample_distribution_power: settings.sample_distribution_power,
            thin_occluder_compensation: settings.thin_occluder_compensation,
            final_value_power: settings.final_value_power,
            depth_mip_sampling_offset: settings.depth_mip_sampling_offset,
            noise_index,
            denoise_blur_beta,
            direct_lighting_strength: settings.direct_lighting_strength,
            bent_normals: settings.bent_normals as u32,
            padding: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{uvec2, vec4};

    use super::*;
    use crate::DenoisingLevel;

    fn camera(viewport: UVec2) -> Camera {
        Camera {
            projection: Mat4::perspective_rh(
                60.0_f32.to_radians(),
                viewport.x as f32 / viewport.y as f32,
                0.1,
                100.0,
            ),
            viewport,
        }
    }

    /// Projects a view-space point `distance` units in front of the camera
    /// and returns the raw depth-buffer value it would produce.
    fn raw_depth(projection: Mat4, distance: f32) -> f32 {
        let clip = projection * vec4(0.0, 0.0, -distance, 1.0);

        clip.z / clip.w
    }

    #[test]
    fn working_size() {
        let target = camera(uvec2(1920, 1080));

        assert_eq!(
            uvec2(1920, 1080),
            target.working_size(ResolutionScale::Full)
        );
        assert_eq!(uvec2(960, 540), target.working_size(ResolutionScale::Half));
        assert_eq!(
            uvec2(480, 270),
            target.working_size(ResolutionScale::Quarter)
        );
    }

    #[test]
    fn working_size_never_hits_zero() {
        let target = camera(uvec2(3, 1));

        assert_eq!(uvec2(1, 1), target.working_size(ResolutionScale::Quarter));
    }

    #[test]
    fn resolution_scale_vector() {
        let target = camera(uvec2(1920, 1080));
        let size = target.working_size(ResolutionScale::Half);
        let scale = size.as_vec2() / target.viewport.as_vec2();

        assert_relative_eq!(scale.x, 0.5);
        assert_relative_eq!(scale.y, 0.5);
    }

    #[test]
    fn serialize_linearizes_depth() {
        let target = camera(uvec2(1920, 1080));

        let constants =
            target.serialize(&Settings::default(), target.viewport, 0);

        for distance in [0.1, 1.0, 10.0, 100.0] {
            let raw = raw_depth(target.projection, distance);

            assert_relative_eq!(
                constants.linearize_depth(raw),
                distance,
                max_relative = 1e-3,
            );
        }
    }

    #[test]
    fn serialize_linearizes_reversed_z_depth() {
        let viewport = uvec2(1280, 720);

        let target = Camera {
            projection: Mat4::perspective_infinite_reverse_rh(
                90.0_f32.to_radians(),
                viewport.x as f32 / viewport.y as f32,
                0.25,
            ),
            viewport,
        };

        let constants = target.serialize(&Settings::default(), viewport, 0);

        for distance in [0.25, 4.0, 1000.0] {
            let raw = raw_depth(target.projection, distance);

            assert_relative_eq!(
                constants.linearize_depth(raw),
                distance,
                max_relative = 1e-3,
            );
        }
    }

    #[test]
    fn serialize_recovers_fov() {
        let target = camera(uvec2(1600, 900));

        let constants =
            target.serialize(&Settings::default(), target.viewport, 0);

        let tan_y = (0.5 * 60.0_f32.to_radians()).tan();
        let tan_x = tan_y * (1600.0 / 900.0);

        assert_relative_eq!(
            constants.camera_tan_half_fov.y,
            tan_y,
            max_relative = 1e-5,
        );
        assert_relative_eq!(
            constants.camera_tan_half_fov.x,
            tan_x,
            max_relative = 1e-5,
        );
    }

    #[test]
    fn serialize_scales_to_working_resolution() {
        let target = camera(uvec2(1920, 1080));
        let size = target.working_size(ResolutionScale::Half);

        let constants = target.serialize(&Settings::default(), size, 0);

        assert_eq!(960, constants.viewport_size.x);
        assert_eq!(540, constants.viewport_size.y);
        assert_relative_eq!(constants.viewport_pixel_size.x, 1.0 / 960.0);
        assert_relative_eq!(constants.viewport_pixel_size.y, 1.0 / 540.0);
        assert_relative_eq!(
            constants.ndc_to_view_mul_x_pixel_size.x,
            constants.ndc_to_view_mul.x / 960.0,
            max_relative = 1e-6,
        );
    }

    #[test]
    fn serialize_neutralizes_disabled_denoising() {
        let target = camera(uvec2(1920, 1080));

        let settings = Settings {
            denoising_level: DenoisingLevel::Disabled,
            ..Default::default()
        };

        let constants = target.serialize(&settings, target.viewport, 33);

        assert_eq!(0, constants.noise_index);
        assert_relative_eq!(constants.denoise_blur_beta, 1e4);

        let constants =
            target.serialize(&Settings::default(), target.viewport, 33);

        assert_eq!(33, constants.noise_index);
        assert_relative_eq!(constants.denoise_blur_beta, 1.2);
    }
}
