//! Default render settings and their sanitization.

use serde::{Deserialize, Serialize};

use crate::models::EffectControls;
use crate::presets::Fabric;

/// Longest image side processed by default; larger inputs are downscaled first.
pub const DEFAULT_MAX_RENDER_SIZE: u32 = 1700;

/// Default render settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineDefaults {
    /// Fabric used when none is given
    pub fabric: Fabric,

    /// Control values used when none are given
    pub controls: EffectControls,

    /// Fixed grain seed; a fresh one is drawn per render when absent
    pub seed: Option<u64>,

    /// Longest side of the processed image in pixels
    pub max_render_size: u32,
}

impl Default for PipelineDefaults {
    fn default() -> Self {
        Self {
            fabric: Fabric::default(),
            controls: EffectControls::default(),
            seed: None,
            max_render_size: DEFAULT_MAX_RENDER_SIZE,
        }
    }
}

impl PipelineDefaults {
    pub(crate) fn sanitize(&mut self) {
        // Thickness is clamped against the rendered fabric by the transmission model
        self.controls.sanitize();
        self.max_render_size = self.max_render_size.clamp(1, 16_384);
    }
}
