//! Resolved render settings.

use velum_core::{EffectControls, Fabric};

use crate::parsers::{Stamp, Stroke};

/// Everything needed to render one file.
/// Used by both apply and batch commands to avoid duplication.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub fabric: Fabric,
    pub controls: EffectControls,

    /// Fixed grain seed; drawn at random per run when absent
    pub seed: Option<u64>,

    // Brush stamps and strokes, in source image pixels
    pub dodge: Vec<Stamp>,
    pub burn: Vec<Stamp>,
    pub dodge_strokes: Vec<Stroke>,
    pub burn_strokes: Vec<Stroke>,
    pub stroke_opacity: f32,

    /// Longest side of the processed image
    pub max_size: u32,
}

impl RenderSettings {
    /// The fixed seed, or a fresh random one.
    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
