/// Base algorithm configuration, fixed for the engine's lifetime.
///
/// The defaults follow the reference GTAO tuning; per-frame adjustments come
/// in through [`Modifiers`].
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    pub resolution_scale: ResolutionScale,
    pub quality_level: QualityLevel,
    pub denoising_level: DenoisingLevel,
    /// When set, the occlusion term carries the average unoccluded direction
    /// packed alongside it; affects buffer formats across the pipeline.
    pub bent_normals: bool,
    /// How strongly direct lighting is allowed to override the occlusion;
    /// forwarded to the lighting stage unchanged.
    pub direct_lighting_strength: f32,
    /// World-space sampling radius; must be positive.
    pub radius: f32,
    /// Occlusion falloff distance, as a fraction of the radius.
    pub falloff_range: f32,
    pub radius_multiplier: f32,
    pub sample_distribution_power: f32,
    pub thin_occluder_compensation: f32,
    pub final_value_power: f32,
    pub depth_mip_sampling_offset: f32,
}

impl Settings {
    /// Storage format of the occlusion term; wide enough for a bent normal
    /// when one is requested.
    pub(crate) fn ao_term_format(&self) -> wgpu::TextureFormat {
        if self.bent_normals {
            wgpu::TextureFormat::R32Uint
        } else {
            wgpu::TextureFormat::R8Uint
        }
    }

    /// Format of the published output; occlusion alone fits a normalized
    /// byte, a packed bent normal needs the full word.
    pub(crate) fn ao_final_format(&self) -> wgpu::TextureFormat {
        if self.bent_normals {
            wgpu::TextureFormat::R32Uint
        } else {
            wgpu::TextureFormat::R8Unorm
        }
    }

    /// Applies this frame's modifiers on top of the base configuration;
    /// `None` or inactive fields leave the base values untouched.
    pub(crate) fn resolved(&self, modifiers: Option<&Modifiers>) -> Self {
        let mut this = *self;

        if let Some(modifiers) = modifiers {
            if let Some(power) = modifiers.final_value_power {
                this.final_value_power *= power.clamp(0.0, 5.0);
            }

            if let Some(range) = modifiers.falloff_range {
                this.falloff_range *= range.clamp(0.0, 10.0);
            }

            if let Some(radius) = modifiers.radius {
                this.radius = radius.max(0.0);
            }
        }

        this
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution_scale: Default::default(),
            quality_level: Default::default(),
            denoising_level: Default::default(),
            bent_normals: false,
            direct_lighting_strength: 0.3,
            radius: 0.5,
            falloff_range: 0.615,
            radius_multiplier: 1.457,
            sample_distribution_power: 2.0,
            thin_occluder_compensation: 0.0,
            final_value_power: 2.2,
            depth_mip_sampling_offset: 3.30,
        }
    }
}

/// Ratio between the render resolution and the resolution the occlusion is
/// computed at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolutionScale {
    #[default]
    Full,
    Half,
    Quarter,
}

impl ResolutionScale {
    pub fn factor(self) -> u32 {
        match self {
            Self::Full => 1,
            Self::Half => 2,
            Self::Quarter => 4,
        }
    }
}

/// Sample density of the occlusion estimate; tiers trade cost for estimate
/// quality and nothing else - dimensions and formats stay identical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QualityLevel {
    Low,
    Medium,
    #[default]
    High,
    Ultra,
}

impl QualityLevel {
    /// Kernel index; each tier has its own entry point in the occlusion
    /// module.
    pub fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Ultra => 3,
        }
    }
}

/// Number of edge-aware blur iterations; the loop itself never runs fewer
/// than once, `Disabled` instead neutralizes the blur through the derived
/// constants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DenoisingLevel {
    Disabled,
    #[default]
    Sharp,
    Medium,
    Soft,
}

impl DenoisingLevel {
    pub fn passes(self) -> u32 {
        match self {
            Self::Disabled => 0,
            Self::Sharp => 1,
            Self::Medium => 2,
            Self::Soft => 3,
        }
    }
}

/// Optional per-frame overrides, e.g. blended out of the host's override
/// volumes; multiplier fields scale the base value, replacement fields
/// substitute it, `None` fields are inactive.
#[derive(Clone, Copy, Debug, Default)]
pub struct Modifiers {
    /// Multiplies the base final-value power; clamped to `0..=5`.
    pub final_value_power: Option<f32>,
    /// Multiplies the base falloff range; clamped to `0..=10`.
    pub falloff_range: Option<f32>,
    /// Replaces the base sampling radius.
    pub radius: Option<f32>,
    /// Replaces the composite intensity.
    pub intensity: Option<f32>,
}

impl Modifiers {
    pub(crate) fn intensity(&self) -> f32 {
        self.intensity.map_or(1.0, |intensity| intensity.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn resolved_without_modifiers() {
        let base = Settings {
            falloff_range: 0.1,
            ..Default::default()
        };

        let target = base.resolved(None);

        assert_relative_eq!(target.falloff_range, 0.1);
        assert_relative_eq!(target.radius, base.radius);
        assert_relative_eq!(target.final_value_power, base.final_value_power);
    }

    #[test]
    fn resolved_with_inactive_modifiers() {
        let base = Settings {
            falloff_range: 0.1,
            ..Default::default()
        };

        let target = base.resolved(Some(&Modifiers::default()));

        assert_relative_eq!(target.falloff_range, 0.1);
        assert_relative_eq!(target.radius, base.radius);
    }

    #[test]
    fn resolved_multipliers() {
        let base = Settings {
            falloff_range: 0.1,
            final_value_power: 2.2,
            ..Default::default()
        };

        let target = base.resolved(Some(&Modifiers {
            falloff_range: Some(2.0),
            final_value_power: Some(0.5),
            ..Default::default()
        }));

        assert_relative_eq!(target.falloff_range, 0.2);
        assert_relative_eq!(target.final_value_power, 1.1);
    }

    #[test]
    fn resolved_replacements() {
        let base = Settings::default();

        let target = base.resolved(Some(&Modifiers {
            radius: Some(1.25),
            ..Default::default()
        }));

        assert_relative_eq!(target.radius, 1.25);
    }

    #[test]
    fn resolved_clamps_modifiers() {
        let base = Settings {
            falloff_range: 1.0,
            final_value_power: 1.0,
            ..Default::default()
        };

        let target = base.resolved(Some(&Modifiers {
            falloff_range: Some(100.0),
            final_value_power: Some(-1.0),
            radius: Some(-3.0),
            ..Default::default()
        }));

        assert_relative_eq!(target.falloff_range, 10.0);
        assert_relative_eq!(target.final_value_power, 0.0);
        assert_relative_eq!(target.radius, 0.0);
    }

    #[test]
    fn intensity() {
        assert_relative_eq!(Modifiers::default().intensity(), 1.0);

        let target = Modifiers {
            intensity: Some(0.75),
            ..Default::default()
        };

        assert_relative_eq!(target.intensity(), 0.75);

        let target = Modifiers {
            intensity: Some(-1.0),
            ..Default::default()
        };

        assert_relative_eq!(target.intensity(), 0.0);
    }

    #[test]
    fn formats() {
        let base = Settings::default();

        assert_eq!(wgpu::TextureFormat::R8Uint, base.ao_term_format());
        assert_eq!(wgpu::TextureFormat::R8Unorm, base.ao_final_format());

        let bent = Settings {
            bent_normals: true,
            ..Default::default()
        };

        assert_eq!(wgpu::TextureFormat::R32Uint, bent.ao_term_format());
        assert_eq!(wgpu::TextureFormat::R32Uint, bent.ao_final_format());
    }

    #[test]
    fn quality_kernel_indices_are_bijective() {
        let indices: Vec<_> = [
            QualityLevel::Low,
            QualityLevel::Medium,
            QualityLevel::High,
            QualityLevel::Ultra,
        ]
        .into_iter()
        .map(QualityLevel::index)
        .collect();

        assert_eq!(vec![0, 1, 2, 3], indices);
    }

    #[test]
    fn denoising_pass_counts() {
        assert_eq!(0, DenoisingLevel::Disabled.passes());
        assert_eq!(1, DenoisingLevel::Sharp.passes());
        assert_eq!(2, DenoisingLevel::Medium.passes());
        assert_eq!(3, DenoisingLevel::Soft.passes());
    }
}
