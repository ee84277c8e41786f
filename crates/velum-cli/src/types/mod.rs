//! Shared types for CLI commands.

mod settings;

pub use settings::RenderSettings;
