use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Push constants of the composition kernel.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct CompositionPassParams {
    /// Working-to-render resolution ratio; the kernel uses it to address the
    /// smaller working-resolution buffer from full-resolution coordinates.
    pub resolution_scale: Vec2,
    /// Occlusion attenuation multiplier.
    pub intensity: f32,
    pub padding: f32,
}

impl CompositionPassParams {
    pub fn new(resolution_scale: Vec2, intensity: f32) -> Self {
        Self {
            resolution_scale,
            intensity,
            padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::*;

    #[test]
    fn intensity_is_linear() {
        let base = CompositionPassParams::new(vec2(0.5, 0.5), 0.7);
        let doubled = CompositionPassParams::new(vec2(0.5, 0.5), 1.4);

        assert_eq!(2.0 * base.intensity, doubled.intensity);
        assert_eq!(base.resolution_scale, doubled.resolution_scale);
    }
}
