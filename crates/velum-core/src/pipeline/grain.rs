//! Monochromatic sensor grain
//!
//! One uniform draw per pixel, added equally to R, G, and B. Draws come from
//! a caller-supplied generator and are taken in row-major order before the
//! parallel pass, so a seed fully determines the output.

use rand::Rng;

/// Grain amplitude for a preset noise level at a given reveal.
#[inline]
pub fn grain_amplitude(preset_noise: f32, reveal: f32) -> f32 {
    preset_noise * reveal
}

/// Draw one offset per pixel, already scaled to the 0-255 range.
///
/// Each offset is `u * 255 * amplitude` with `u` uniform in `[-0.5, 0.5)`.
pub fn draw_grain<R: Rng + ?Sized>(rng: &mut R, pixels: usize, amplitude: f32) -> Vec<f32> {
    let scale = 255.0 * amplitude;
    (0..pixels)
        .map(|_| rng.gen_range(-0.5f32..0.5) * scale)
        .collect()
}
