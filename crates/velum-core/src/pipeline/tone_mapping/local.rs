//! Dodge and burn on top of the global curve

use crate::models::Mask;

/// Maximum luminance push of a full-strength dodge or burn
pub const LOCAL_ADJUST_GAIN: f32 = 0.22;

/// Brighten toward white by `strength`.
#[inline]
pub fn dodge(y: f32, strength: f32) -> f32 {
    y + LOCAL_ADJUST_GAIN * strength * (1.0 - y)
}

/// Darken by `strength`, weighted toward the shadows.
#[inline]
pub fn burn(y: f32, strength: f32) -> f32 {
    y - LOCAL_ADJUST_GAIN * strength * (1.0 - y)
}

/// Dodge then burn, in that order, on an already tone-mapped luminance.
///
/// The two compose sequentially: burn sees the dodged value, so equal
/// strengths do not cancel.
#[inline]
pub fn apply_local_adjustments(y: f32, dodge_strength: f32, burn_strength: f32) -> f32 {
    burn(dodge(y, dodge_strength), burn_strength)
}

/// Resolved dodge/burn strengths at one pixel, 0.0 for absent masks.
#[inline]
pub fn mask_strengths(dodge: Option<&Mask>, burn: Option<&Mask>, index: usize) -> (f32, f32) {
    (
        dodge.map_or(0.0, |m| m.strength(index)),
        burn.map_or(0.0, |m| m.strength(index)),
    )
}
