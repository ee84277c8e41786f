//! Effect controls and per-call parameters.

use serde::{Deserialize, Serialize};

use super::Mask;
use crate::presets::{Fabric, FabricPreset};

/// Normalized effect controls.
///
/// Every field except `thickness` lives in `[0, 1]`; `thickness` is in the
/// fabric's own units and is clamped to the preset range by the transmission
/// model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectControls {
    /// Material thickness (preset units)
    pub thickness: f32,

    /// Overall effect intensity
    pub intensity: f32,

    /// Shadow lift amount
    pub shadows: f32,

    /// Black deepen amount
    pub blacks: f32,

    /// Highlight hold amount
    pub highlights: f32,

    /// S-curve contrast amount
    pub contrast: f32,

    /// Mid-frequency local contrast
    pub clarity: f32,

    /// Haze removal strength
    pub dehaze: f32,

    /// Chroma smoothing strength
    pub denoise_color: f32,

    /// Luminance smoothing strength
    pub denoise_luma: f32,

    /// Unsharp mask amount
    pub sharpen: f32,

    /// Edge threshold for sharpening; higher leaves more flat areas untouched
    pub sharpen_masking: f32,

    /// Add monochromatic grain proportional to reveal
    pub enable_noise: bool,
}

impl Default for EffectControls {
    fn default() -> Self {
        Self {
            thickness: 0.55,
            intensity: 1.0,
            shadows: 0.0,
            blacks: 0.0,
            highlights: 0.0,
            contrast: 0.0,
            clarity: 0.0,
            dehaze: 0.0,
            denoise_color: 0.0,
            denoise_luma: 0.0,
            sharpen: 0.0,
            sharpen_masking: 0.0,
            enable_noise: true,
        }
    }
}

impl EffectControls {
    /// Controls with every adjustment at zero and noise off.
    ///
    /// Thickness and intensity keep their defaults.
    pub fn neutral() -> Self {
        Self {
            enable_noise: false,
            ..Self::default()
        }
    }

    /// Clamp every normalized control into `[0, 1]`.
    ///
    /// Non-finite values fall back to zero. Thickness is only forced to be
    /// finite and non-negative.
    pub fn sanitize(&mut self) {
        for value in [
            &mut self.intensity,
            &mut self.shadows,
            &mut self.blacks,
            &mut self.highlights,
            &mut self.contrast,
            &mut self.clarity,
            &mut self.dehaze,
            &mut self.denoise_color,
            &mut self.denoise_luma,
            &mut self.sharpen,
            &mut self.sharpen_masking,
        ] {
            *value = if value.is_finite() {
                (*value).clamp(0.0, 1.0)
            } else {
                0.0
            };
        }
        self.thickness = if self.thickness.is_finite() {
            self.thickness.max(0.0)
        } else {
            0.0
        };
    }
}

/// Everything one render call needs: fabric, controls, and optional masks.
///
/// Built fresh per request. Masks are borrowed from the caller, who keeps
/// ownership and accumulates strokes into them between calls.
#[derive(Debug, Clone, Copy)]
pub struct EffectParameters<'a> {
    pub fabric: Fabric,
    pub controls: EffectControls,
    pub dodge_mask: Option<&'a Mask>,
    pub burn_mask: Option<&'a Mask>,
}

impl<'a> EffectParameters<'a> {
    pub fn new(fabric: Fabric, controls: EffectControls) -> Self {
        Self {
            fabric,
            controls,
            dodge_mask: None,
            burn_mask: None,
        }
    }

    pub fn with_dodge_mask(mut self, mask: &'a Mask) -> Self {
        self.dodge_mask = Some(mask);
        self
    }

    pub fn with_burn_mask(mut self, mask: &'a Mask) -> Self {
        self.burn_mask = Some(mask);
        self
    }

    /// Constants of the selected fabric
    pub fn preset(&self) -> &'static FabricPreset {
        self.fabric.preset()
    }
}
