use std::path::PathBuf;
use std::time::Instant;

use velum_cli::{determine_output_path, render_file, EffectArgs};
use velum_core::config::PipelineDefaults;

/// Render a single PNG with the fabric effect.
pub fn cmd_apply(
    input: PathBuf,
    out: Option<PathBuf>,
    effect: EffectArgs,
    defaults: &PipelineDefaults,
) -> Result<(), String> {
    let start = Instant::now();
    let settings = effect.resolve(defaults)?;
    let output_path = determine_output_path(&input, &out)?;

    println!("Rendering: {}", input.display());
    println!(
        "  Fabric: {} ({})",
        settings.fabric,
        settings.fabric.preset().label
    );
    println!(
        "  Thickness: {:.2}  Intensity: {:.2}",
        settings.controls.thickness, settings.controls.intensity
    );
    if !settings.dodge.is_empty() || !settings.burn.is_empty() {
        println!(
            "  Stamps: {} dodge, {} burn",
            settings.dodge.len(),
            settings.burn.len()
        );
    }
    if !settings.dodge_strokes.is_empty() || !settings.burn_strokes.is_empty() {
        println!(
            "  Strokes: {} dodge, {} burn",
            settings.dodge_strokes.len(),
            settings.burn_strokes.len()
        );
    }

    let report = render_file(&input, &output_path, &settings, settings.base_seed())?;

    if report.output_size != report.source_size {
        println!(
            "  Resized: {}x{} -> {}x{}",
            report.source_size.0, report.source_size.1, report.output_size.0, report.output_size.1
        );
    }
    if settings.controls.enable_noise {
        println!("  Seed: {}", report.seed);
    }
    println!(
        "Saved: {} ({:.2}s)",
        output_path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
