//! Smoothing and edge-gated sharpening
//!
//! Both stages read the radius-1 blur of the original image as their
//! reference. Denoise runs first in the pipeline; sharpen runs last, just
//! before the final clamp.

use crate::color::{linear_to_rgb, luminance, luminance_ratio, rescale_linear, rgb_to_linear};
use crate::models::EffectControls;

/// Scale from a denoise control to its blend fraction
pub const DENOISE_GAIN: f32 = 0.55;

/// Scale from the sharpen control to its unsharp amount
pub const SHARPEN_GAIN: f32 = 0.55;

/// Scale from the masking control to its edge threshold
pub const SHARPEN_MASK_GAIN: f32 = 0.35;

/// Blend fractions for chroma and luma smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DenoiseStage {
    pub color: f32,
    pub luma: f32,
}

impl DenoiseStage {
    pub fn new(controls: &EffectControls) -> Self {
        Self {
            color: controls.denoise_color * DENOISE_GAIN,
            luma: controls.denoise_luma * DENOISE_GAIN,
        }
    }

    /// Chroma smoothing followed by luma smoothing.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3], reference: [u8; 3]) -> [f32; 3] {
        let mut rgb = rgb;
        if self.color > 0.0 {
            rgb = denoise_color(rgb, reference, self.color);
        }
        if self.luma > 0.0 {
            rgb = denoise_luma(rgb, reference, self.luma);
        }
        rgb
    }
}

/// Blend each channel toward the reference.
#[inline]
pub fn denoise_color(rgb: [f32; 3], reference: [u8; 3], amount: f32) -> [f32; 3] {
    [
        rgb[0] + (reference[0] as f32 - rgb[0]) * amount,
        rgb[1] + (reference[1] as f32 - rgb[1]) * amount,
        rgb[2] + (reference[2] as f32 - rgb[2]) * amount,
    ]
}

/// Blend linear luminance toward the reference luminance, keeping chroma.
#[inline]
pub fn denoise_luma(rgb: [f32; 3], reference: [u8; 3], amount: f32) -> [f32; 3] {
    let linear = rgb_to_linear(rgb);
    let y = luminance(linear[0], linear[1], linear[2]);

    let reference_linear = rgb_to_linear([
        reference[0] as f32,
        reference[1] as f32,
        reference[2] as f32,
    ]);
    let y_reference = luminance(
        reference_linear[0],
        reference_linear[1],
        reference_linear[2],
    );

    let target = y + (y_reference - y) * amount;
    linear_to_rgb(rescale_linear(linear, luminance_ratio(y, target)))
}

/// Unsharp amount and edge threshold for the sharpen stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpenStage {
    pub amount: f32,
    pub threshold: f32,
}

impl SharpenStage {
    pub fn new(controls: &EffectControls) -> Self {
        Self {
            amount: controls.sharpen * SHARPEN_GAIN,
            threshold: controls.sharpen_masking * SHARPEN_MASK_GAIN,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.amount <= 0.0
    }

    /// Sharpen the working value against the reference, gated by local edges.
    ///
    /// Edge strength is measured on the original pixel, not the working one.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3], original: [u8; 3], reference: [u8; 3]) -> [f32; 3] {
        let mask = edge_mask(edge_strength(original, reference), self.threshold);
        let amount = self.amount * mask;
        if amount == 0.0 {
            return rgb;
        }
        [
            rgb[0] + (rgb[0] - reference[0] as f32) * amount,
            rgb[1] + (rgb[1] - reference[1] as f32) * amount,
            rgb[2] + (rgb[2] - reference[2] as f32) * amount,
        ]
    }
}

/// Mean absolute difference from the reference, normalized to `[0, 1]`.
#[inline]
pub fn edge_strength(original: [u8; 3], reference: [u8; 3]) -> f32 {
    let sum: f32 = original
        .iter()
        .zip(reference.iter())
        .map(|(&o, &r)| (o as f32 - r as f32).abs())
        .sum();
    sum / 3.0 / 255.0
}

/// Soft threshold: 0 below `threshold`, rising linearly to 1 at full edge.
#[inline]
pub fn edge_mask(edge: f32, threshold: f32) -> f32 {
    ((edge - threshold) / (1.0 - threshold)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denoise_color_blends_toward_reference() {
        let out = denoise_color([100.0, 200.0, 50.0], [120, 180, 50], 0.5);
        assert_eq!(out, [110.0, 190.0, 50.0]);
    }

    #[test]
    fn test_denoise_luma_moves_luminance_only() {
        let rgb = [180.0, 90.0, 60.0];
        let out = denoise_luma(rgb, [100, 100, 100], 0.55);

        let lin_in = rgb_to_linear(rgb);
        let lin_out = rgb_to_linear(out);
        let y_in = luminance(lin_in[0], lin_in[1], lin_in[2]);
        let y_out = luminance(lin_out[0], lin_out[1], lin_out[2]);
        assert!(y_out < y_in, "luma should fall toward darker reference");
        assert!(((lin_in[0] / lin_in[2]) - (lin_out[0] / lin_out[2])).abs() < 1e-3);
    }

    #[test]
    fn test_denoise_stage_skips_zero_amounts() {
        let stage = DenoiseStage::new(&EffectControls::neutral());
        let rgb = [13.0, 200.0, 77.0];
        assert_eq!(stage.apply(rgb, [0, 0, 0]), rgb);
    }

    #[test]
    fn test_edge_strength_and_mask() {
        assert_eq!(edge_strength([10, 10, 10], [10, 10, 10]), 0.0);
        assert!((edge_strength([255, 0, 0], [0, 0, 0]) - 1.0 / 3.0).abs() < 1e-6);

        assert_eq!(edge_mask(0.1, 0.35), 0.0);
        assert_eq!(edge_mask(1.0, 0.35), 1.0);
        assert!((edge_mask(0.5, 0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sharpen_flat_region_untouched() {
        let controls = EffectControls {
            sharpen: 1.0,
            ..EffectControls::neutral()
        };
        let stage = SharpenStage::new(&controls);
        let rgb = [130.0, 130.0, 130.0];
        assert_eq!(stage.apply(rgb, [128, 128, 128], [128, 128, 128]), rgb);
    }

    #[test]
    fn test_sharpen_amplifies_edges() {
        let controls = EffectControls {
            sharpen: 1.0,
            ..EffectControls::neutral()
        };
        let stage = SharpenStage::new(&controls);
        let out = stage.apply([200.0, 200.0, 200.0], [200, 200, 200], [100, 100, 100]);

        let edge = 100.0 / 255.0;
        let expected = 200.0 + 100.0 * 0.55 * edge;
        assert!((out[0] - expected).abs() < 1e-3, "got {}", out[0]);
    }

    #[test]
    fn test_sharpen_masking_suppresses_weak_edges() {
        let controls = EffectControls {
            sharpen: 1.0,
            sharpen_masking: 1.0,
            ..EffectControls::neutral()
        };
        let stage = SharpenStage::new(&controls);
        let rgb = [140.0, 140.0, 140.0];
        // Edge 20/255 is below the 0.35 threshold
        assert_eq!(stage.apply(rgb, [140, 140, 140], [120, 120, 120]), rgb);
    }
}
