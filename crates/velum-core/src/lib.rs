//! Velum Core Library
//!
//! Fabric-style veil effect for 8-bit RGBA images: a tissue blend and
//! transmission detail controlled by a physical thickness model, followed by
//! optional tone, dodge/burn, denoise, sharpen, and grain stages.

pub mod color;
pub mod config;
pub mod filters;
pub mod models;
pub mod parallel;
pub mod pipeline;
pub mod presets;

// Re-export commonly used types
pub use models::{EffectControls, EffectParameters, Mask, PixelBuffer, DEFAULT_STROKE_OPACITY};
pub use pipeline::{process_image, process_image_seeded, Transmission};
pub use presets::{Fabric, FabricPreset, Look};
