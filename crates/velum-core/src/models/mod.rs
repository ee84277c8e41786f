//! Data models for the effect engine
//!
//! Pixel buffers, dodge/burn masks, and the per-call parameter set.

mod buffer;
mod mask;
mod params;

pub use buffer::PixelBuffer;
pub use mask::{Mask, DEFAULT_STROKE_OPACITY};
pub use params::{EffectControls, EffectParameters};
