//! Shared utilities for velum-cli
//!
//! Argument resolution, PNG I/O, and file rendering used by the `velum`
//! binary's commands.

pub mod args;
pub mod io;
pub mod parsers;
pub mod processing;
pub mod types;

// Re-export commonly used items at the crate root for convenience
pub use args::EffectArgs;
pub use io::{decode_png, encode_png};
pub use parsers::{parse_stamp, parse_stroke, Stamp, Stroke};
pub use processing::{
    determine_output_path, expand_inputs, fit_dimensions, fit_within, render_file, render_image,
    RenderReport, SUPPORTED_EXTENSIONS,
};
pub use types::RenderSettings;
