//! Color encoding helpers
//!
//! The engine works on 8-bit sRGB buffers but performs tone and luminance
//! operations in linear light. These helpers hold the transfer functions and
//! the chroma-preserving luminance rescale shared by the tone curve and the
//! luma denoiser.

mod conversions;

#[cfg(test)]
mod tests;

pub use conversions::{
    linear_to_rgb, linear_to_srgb, luminance, luminance_ratio, rescale_linear, rgb_to_linear,
    srgb_to_linear, LUMA_WEIGHTS, LUMINANCE_EPSILON,
};
