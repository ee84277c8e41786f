//! Spatial filters
//!
//! One kernel serves three roles in the pipeline: the fabric's tissue scatter
//! (preset radius), the denoise/sharpen reference (radius 1), and the clarity
//! reference (radius 2).

mod blur;

pub(crate) use blur::box_blur_rgba_above;
pub use blur::{box_blur_rgba, CLARITY_REFERENCE_RADIUS, DENOISE_REFERENCE_RADIUS};
