//! Parsing functions for CLI arguments.

mod base;

pub use base::{parse_stamp, parse_stroke, Stamp, Stroke};
