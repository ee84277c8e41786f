//! Input file handling and path utilities.

use std::path::{Path, PathBuf};

/// Supported image extensions for batch processing
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png"];

/// Suffix appended to the input stem for default output names
pub const OUTPUT_SUFFIX: &str = "_velum";

/// Determine output path based on input and an optional output dir or file
///
/// # Arguments
/// * `input` - Input file path
/// * `out` - Optional output directory or file path
///
/// # Returns
/// The full output path for the rendered image
pub fn determine_output_path(input: &Path, out: &Option<PathBuf>) -> Result<PathBuf, String> {
    let filename = input
        .file_stem()
        .ok_or("Invalid input filename")?
        .to_string_lossy();
    let output_name = format!("{}{}.png", filename, OUTPUT_SUFFIX);

    if let Some(out_path) = out {
        // If out is a directory, use input filename with the suffix
        if out_path.is_dir() {
            Ok(out_path.join(output_name))
        } else {
            Ok(out_path.clone())
        }
    } else {
        let parent = input.parent().unwrap_or(Path::new("."));
        Ok(parent.join(output_name))
    }
}

/// Expand a list of inputs (files and directories) into a list of image files.
///
/// Directories are scanned for PNG files; previous outputs (`*_velum.png`)
/// are skipped. If `recursive` is true, subdirectories are also scanned.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_images_from_dir(input, recursive, &mut files)?;
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(format!("Path not found: {}", input.display()));
        }
    }

    // Sort for consistent ordering (and stable per-file seeds)
    files.sort();
    files.dedup();
    Ok(files)
}

/// Recursively collect image files from a directory.
fn collect_images_from_dir(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();

        if path.is_dir() && recursive {
            collect_images_from_dir(&path, recursive, files)?;
        } else if path.is_file() && is_supported_input(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_supported_input(path: &Path) -> bool {
    let supported = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);
    let is_output = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
        .unwrap_or(false);
    supported && !is_output
}
