//! Fabric transmission pipeline
//!
//! Turns an RGBA buffer plus an [`EffectParameters`] set into a new buffer of
//! the same size. The input is never modified.
//!
//! This module is organized into submodules:
//! - `transmission`: attenuation law producing `reveal` and the tissue blend
//! - `detail`: high-pass transmission detail, clarity, and dehaze
//! - `tone_mapping`: linear-light tone curve plus dodge/burn masks
//! - `denoise`: chroma/luma smoothing and edge-gated sharpening
//! - `grain`: monochromatic noise from an injectable generator
//!
//! Stage order per pixel is fixed:
//! denoise (color, luma) -> tissue blend -> transmission detail ->
//! clarity/dehaze -> tone curve + dodge/burn -> desaturation -> grain ->
//! sharpen -> round and clamp. Alpha passes through untouched.
//!
//! All reference blurs (tissue, radius 1, radius 2) are computed once from the
//! original buffer. Only each pixel's own working value threads through the
//! stages.

mod denoise;
mod detail;
mod grain;
mod tone_mapping;
mod transmission;


pub use denoise::{
    denoise_color, denoise_luma, edge_mask, edge_strength, DenoiseStage, SharpenStage,
    DENOISE_GAIN, SHARPEN_GAIN, SHARPEN_MASK_GAIN,
};
pub use detail::{
    high_pass, local_contrast_gain, transmission_delta, DetailStage, CLARITY_GAIN, DEHAZE_BOOST,
    DEHAZE_GAIN,
};
pub use grain::{draw_grain, grain_amplitude};
pub use tone_mapping::{
    apply_local_adjustments, apply_tone_curve_point, apply_tone_pixel, black_deepen, burn,
    contrast_s_curve, dodge, highlight_hold, shadow_lift, ToneControls, LOCAL_ADJUST_GAIN,
};
pub use transmission::{Transmission, MIX_TRANS_CAP, MIX_TRANS_GAIN};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::luminance;
use crate::filters::{box_blur_rgba_above, CLARITY_REFERENCE_RADIUS, DENOISE_REFERENCE_RADIUS};
use crate::models::{EffectParameters, PixelBuffer};
use crate::parallel::{for_each_pixel_mut_above, PARALLEL_THRESHOLD};
use crate::verbose_println;

use tone_mapping::mask_strengths;

/// Reference blurs of the original image, computed once per call.
struct References {
    tissue: Vec<u8>,
    fine: Vec<u8>,
    clarity: Vec<u8>,
}

impl References {
    fn compute(image: &PixelBuffer, tissue_radius: u32, threshold: usize) -> Self {
        let (w, h) = (image.width() as usize, image.height() as usize);
        let src = image.data();
        let blur = |radius| box_blur_rgba_above(src, w, h, radius, threshold);
        Self {
            tissue: blur(tissue_radius),
            fine: blur(DENOISE_REFERENCE_RADIUS),
            clarity: blur(CLARITY_REFERENCE_RADIUS),
        }
    }
}

/// Per-call constants shared by every pixel.
struct Stages {
    mix_trans: f32,
    denoise: DenoiseStage,
    detail: DetailStage,
    tone: ToneControls,
    desaturation: f32,
    sharpen: SharpenStage,
}

/// Apply the fabric effect, drawing grain from `rng`.
///
/// The generator is only advanced when grain is enabled and its amplitude is
/// non-zero, in which case exactly one value is drawn per pixel.
///
/// The caller guarantees that attached masks match the image dimensions and
/// that normalized controls are already within `[0, 1]`.
pub fn process_image<R: Rng + ?Sized>(
    image: &PixelBuffer,
    params: &EffectParameters<'_>,
    rng: &mut R,
) -> PixelBuffer {
    render(image, params, rng, PARALLEL_THRESHOLD)
}

/// Full render with an explicit parallel dispatch threshold.
fn render<R: Rng + ?Sized>(
    image: &PixelBuffer,
    params: &EffectParameters<'_>,
    rng: &mut R,
    threshold: usize,
) -> PixelBuffer {
    let preset = params.preset();
    let controls = &params.controls;

    for mask in [params.dodge_mask, params.burn_mask].into_iter().flatten() {
        debug_assert!(
            mask.matches(image.width(), image.height()),
            "mask {}x{} does not match image {}x{}",
            mask.width(),
            mask.height(),
            image.width(),
            image.height()
        );
    }

    let transmission = Transmission::compute(preset, controls.thickness, controls.intensity);
    verbose_println!(
        "[velum] {} thickness={:.3} reveal={:.4} mix_trans={:.4}",
        params.fabric,
        transmission.thickness,
        transmission.reveal,
        transmission.mix_trans
    );

    let stages = Stages {
        mix_trans: transmission.mix_trans,
        denoise: DenoiseStage::new(controls),
        detail: DetailStage::new(preset, &transmission, controls),
        tone: ToneControls {
            shadows: controls.shadows,
            highlights: controls.highlights,
            contrast: controls.contrast,
            blacks: controls.blacks,
        },
        desaturation: preset.desat * transmission.reveal,
        sharpen: SharpenStage::new(controls),
    };

    let amplitude = grain_amplitude(preset.noise, transmission.reveal);
    let grain = if controls.enable_noise && amplitude > 0.0 {
        Some(draw_grain(rng, image.pixel_count(), amplitude))
    } else {
        verbose_println!("[velum] grain skipped");
        None
    };

    let references = References::compute(image, preset.blur_radius, threshold);
    let src = image.data();
    let mut out = src.to_vec();

    for_each_pixel_mut_above(&mut out, threshold, |p, pixel| {
        let i = p * 4;
        let original = [src[i], src[i + 1], src[i + 2]];
        let tissue = [
            references.tissue[i],
            references.tissue[i + 1],
            references.tissue[i + 2],
        ];
        let fine = [
            references.fine[i],
            references.fine[i + 1],
            references.fine[i + 2],
        ];
        let clarity = [
            references.clarity[i],
            references.clarity[i + 1],
            references.clarity[i + 2],
        ];

        let mut rgb = [original[0] as f32, original[1] as f32, original[2] as f32];

        rgb = stages.denoise.apply(rgb, fine);

        for c in 0..3 {
            rgb[c] += (tissue[c] as f32 - rgb[c]) * stages.mix_trans;
        }
        if !stages.detail.is_noop() {
            for c in 0..3 {
                rgb[c] += stages.detail.transmission_delta(original[c], tissue[c]);
                rgb[c] += stages.detail.local_contrast_delta(original[c], clarity[c]);
            }
        }

        let (dodge_strength, burn_strength) =
            mask_strengths(params.dodge_mask, params.burn_mask, p);
        if !stages.tone.is_identity() || dodge_strength > 0.0 || burn_strength > 0.0 {
            rgb = apply_tone_pixel(rgb, &stages.tone, dodge_strength, burn_strength);
        } else {
            for value in rgb.iter_mut() {
                *value = (*value).clamp(0.0, 255.0);
            }
        }

        if stages.desaturation > 0.0 {
            let lum = luminance(rgb[0], rgb[1], rgb[2]);
            for value in rgb.iter_mut() {
                *value += (lum - *value) * stages.desaturation;
            }
        }

        if let Some(grain) = &grain {
            let g = grain[p];
            for value in rgb.iter_mut() {
                *value += g;
            }
        }

        if !stages.sharpen.is_noop() {
            rgb = stages.sharpen.apply(rgb, original, fine);
        }

        pixel[0] = quantize(rgb[0]);
        pixel[1] = quantize(rgb[1]);
        pixel[2] = quantize(rgb[2]);
    });

    PixelBuffer::from_parts(image.width(), image.height(), out)
}

/// Apply the fabric effect with grain drawn from a generator seeded by `seed`.
pub fn process_image_seeded(
    image: &PixelBuffer,
    params: &EffectParameters<'_>,
    seed: u64,
) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    process_image(image, params, &mut rng)
}

/// Round to the nearest integer and clamp to the 8-bit range.
#[inline]
pub(crate) fn quantize(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
