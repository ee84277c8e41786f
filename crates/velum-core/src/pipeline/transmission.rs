//! Exponential attenuation model
//!
//! Turns material thickness, density, and user intensity into the bounded
//! `reveal` scalar that gates every detail-revealing stage.

use crate::presets::FabricPreset;

/// Gain from reveal to the tissue-scatter blend fraction
pub const MIX_TRANS_GAIN: f32 = 1.15;

/// Hard cap on the tissue-scatter blend, independent of the preset
pub const MIX_TRANS_CAP: f32 = 0.42;

/// Derived transmission scalars for one render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transmission {
    /// Thickness after clamping to the preset range
    pub thickness: f32,

    /// Fraction of light passing through: `exp(-density * thickness)`
    pub transmittance: f32,

    /// How much underlying detail shows through, in `[0, max_reveal]`
    pub reveal: f32,

    /// Blend fraction toward the tissue blur, in `[0, MIX_TRANS_CAP]`
    pub mix_trans: f32,
}

impl Transmission {
    /// Evaluate the model for a preset, thickness, and intensity.
    pub fn compute(preset: &FabricPreset, thickness: f32, intensity: f32) -> Self {
        let thickness = preset.clamp_thickness(thickness);
        let transmittance = (-preset.density * thickness).exp();
        let reveal = (transmittance * preset.max_reveal * intensity).clamp(0.0, preset.max_reveal);
        let mix_trans = (reveal * MIX_TRANS_GAIN).clamp(0.0, MIX_TRANS_CAP);

        Self {
            thickness,
            transmittance,
            reveal,
            mix_trans,
        }
    }

    /// Largest per-channel detail delta allowed at this reveal level
    pub fn detail_clamp(&self, preset: &FabricPreset) -> f32 {
        preset.max_delta * self.reveal
    }
}
