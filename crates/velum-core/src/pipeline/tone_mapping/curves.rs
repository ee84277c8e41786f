//! Global luminance curve
//!
//! Four shaping steps run in a fixed order on linear luminance, each followed
//! by a clamp to `[0, 1]`.

/// Tone controls extracted from the effect controls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToneControls {
    pub shadows: f32,
    pub highlights: f32,
    pub contrast: f32,
    pub blacks: f32,
}

impl ToneControls {
    /// Whether every step is a no-op
    pub fn is_identity(&self) -> bool {
        self.shadows == 0.0 && self.highlights == 0.0 && self.contrast == 0.0 && self.blacks == 0.0
    }
}

/// Lift shadows, strongest near black and fading exponentially.
#[inline]
pub fn shadow_lift(y: f32, amount: f32) -> f32 {
    (y + amount * (1.0 - y) * (-6.0 * y).exp()).clamp(0.0, 1.0)
}

/// Pull highlights down with a cubic roll-off.
#[inline]
pub fn highlight_hold(y: f32, amount: f32) -> f32 {
    (y - amount * y * y * y * 0.35).clamp(0.0, 1.0)
}

/// Symmetric S-curve around mid-gray.
///
/// The push is zero at 0, 0.5, and 1 and peaks at the quarter points.
#[inline]
pub fn contrast_s_curve(y: f32, amount: f32) -> f32 {
    let d = y - 0.5;
    (y + amount * d * (1.0 - (d.abs() * 2.0).min(1.0)) * 0.6).clamp(0.0, 1.0)
}

/// Deepen blacks with a quadratic weight toward the dark end.
#[inline]
pub fn black_deepen(y: f32, amount: f32) -> f32 {
    let inv = 1.0 - y;
    (y - amount * inv * inv * 0.55).clamp(0.0, 1.0)
}

/// Apply the full curve to one linear luminance value.
pub fn apply_tone_curve_point(y: f32, controls: &ToneControls) -> f32 {
    let mut y = y.clamp(0.0, 1.0);
    y = shadow_lift(y, controls.shadows);
    y = highlight_hold(y, controls.highlights);
    y = contrast_s_curve(y, controls.contrast);
    black_deepen(y, controls.blacks)
}
