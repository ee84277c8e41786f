//! High-pass detail re-injection
//!
//! Three terms share one idea (original minus a blurred copy of itself):
//! - transmission detail against the tissue blur, scaled and clamped by reveal
//! - clarity against the radius-2 reference
//! - dehaze against the same radius-2 reference, stacked with clarity
//!
//! Only the transmission term is clamped per pixel. Clarity and dehaze are
//! bounded by their coefficients alone and rely on the final output clamp.

use super::transmission::Transmission;
use crate::models::EffectControls;
use crate::presets::FabricPreset;

/// Clarity coefficient
pub const CLARITY_GAIN: f32 = 0.35;

/// Dehaze coefficient
pub const DEHAZE_GAIN: f32 = 0.25;

/// Extra dehaze boost on top of its coefficient
pub const DEHAZE_BOOST: f32 = 1.15;

/// Precomputed gains for the detail stage of one render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailStage {
    /// `detail_gain * reveal`
    pub transmission_gain: f32,

    /// Per-channel bound on the transmission term: `max_delta * reveal`
    pub transmission_limit: f32,

    /// Combined clarity and dehaze gain
    pub local_contrast_gain: f32,
}

impl DetailStage {
    pub fn new(
        preset: &FabricPreset,
        transmission: &Transmission,
        controls: &EffectControls,
    ) -> Self {
        Self {
            transmission_gain: preset.detail_gain * transmission.reveal,
            transmission_limit: transmission.detail_clamp(preset),
            local_contrast_gain: local_contrast_gain(controls.clarity, controls.dehaze),
        }
    }

    /// Clamped transmission detail for one channel.
    #[inline]
    pub fn transmission_delta(&self, original: u8, tissue: u8) -> f32 {
        transmission_delta(
            original,
            tissue,
            self.transmission_gain,
            self.transmission_limit,
        )
    }

    /// Clarity plus dehaze detail for one channel, unclamped.
    #[inline]
    pub fn local_contrast_delta(&self, original: u8, reference: u8) -> f32 {
        high_pass(original, reference) * self.local_contrast_gain
    }

    /// Whether both terms vanish
    pub fn is_noop(&self) -> bool {
        self.transmission_gain == 0.0 && self.local_contrast_gain == 0.0
    }
}

/// Original minus its blurred reference.
#[inline]
pub fn high_pass(original: u8, reference: u8) -> f32 {
    original as f32 - reference as f32
}

/// Scaled high-pass, clamped symmetrically to `±limit`.
#[inline]
pub fn transmission_delta(original: u8, tissue: u8, gain: f32, limit: f32) -> f32 {
    (high_pass(original, tissue) * gain).clamp(-limit, limit)
}

/// Combined gain of the clarity and dehaze controls.
#[inline]
pub fn local_contrast_gain(clarity: f32, dehaze: f32) -> f32 {
    clarity * CLARITY_GAIN + dehaze * DEHAZE_GAIN * DEHAZE_BOOST
}
