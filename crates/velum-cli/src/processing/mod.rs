//! Image processing and input handling.

mod input;
mod resize;
mod single;

pub use input::{determine_output_path, expand_inputs, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS};
pub use resize::{fit_dimensions, fit_within};
pub use single::{render_file, render_image, RenderReport};
