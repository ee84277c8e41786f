use std::path::PathBuf;

use velum_core::presets::{save_look, Look};
use velum_core::{EffectControls, Fabric};

/// List the fabric catalog.
pub fn cmd_preset_list() -> Result<(), String> {
    println!("Available fabrics:");
    for fabric in Fabric::ALL {
        let preset = fabric.preset();
        println!(
            "  {:<10} {} (thickness {:.2}-{:.2})",
            fabric.key(),
            preset.label,
            preset.thickness_min,
            preset.thickness_max
        );
    }
    Ok(())
}

/// Display the constants of one fabric.
pub fn cmd_preset_show(key: String) -> Result<(), String> {
    let fabric: Fabric = key.parse()?;
    let preset = fabric.preset();

    println!("\nFabric: {} ({})", fabric.key(), preset.label);
    println!("  Density:        {:.3}", preset.density);
    println!(
        "  Thickness:      {:.2} - {:.2}",
        preset.thickness_min, preset.thickness_max
    );
    println!("  Max reveal:     {:.3}", preset.max_reveal);
    println!("  Detail gain:    {:.3}", preset.detail_gain);
    println!("  Blur radius:    {} px", preset.blur_radius);
    println!("  Desaturation:   {:.3}", preset.desat);
    println!("  Grain:          {:.3}", preset.noise);
    println!("  Max delta:      {:.1}", preset.max_delta);

    println!();
    Ok(())
}

/// Create a new look template file with default controls.
pub fn cmd_preset_create(output: PathBuf, name: String, fabric: Option<String>) -> Result<(), String> {
    println!("Creating new look: {}", name);

    let fabric = match fabric {
        Some(key) => key.parse::<Fabric>()?,
        None => Fabric::default(),
    };

    let look = Look {
        name: name.clone(),
        fabric,
        controls: EffectControls::default(),
        notes: Some(format!("Look: {}", name)),
    };

    save_look(&look, &output)?;

    println!("Look created: {}", output.display());
    println!("You can now edit this file to customize the controls.");
    println!();

    Ok(())
}
