use std::path::PathBuf;

use velum_core::config::PipelineConfig;

const CONFIG_HEADER: &str = "\
# velum pipeline defaults
#
# Searched in order: --config, $VELUM_CONFIG, ./config/velum.yml, ./velum.yml,
# ~/velum/velum.yml. Command-line flags override these values.
#
# fabric: estofado | cortina | seda | poliester
# seed: fixed grain seed (omit or null for a random seed per run)
# max_render_size: longest side in pixels; larger inputs are downscaled

";

/// Write a default `velum.yml`.
///
/// Safe to run multiple times - won't overwrite an existing file unless
/// `force` is true.
pub fn cmd_init(path: Option<PathBuf>, force: bool) -> Result<(), String> {
    let path = path.unwrap_or_else(|| PathBuf::from("velum.yml"));

    if path.exists() && !force {
        println!(
            "Skipped: {} (already exists, use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
    }

    let yaml = PipelineConfig::default().to_yaml()?;
    std::fs::write(&path, format!("{}{}", CONFIG_HEADER, yaml))
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    println!("Wrote: {}", path.display());
    Ok(())
}
