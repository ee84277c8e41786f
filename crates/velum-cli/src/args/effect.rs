//! Effect argument structs for CLI commands.

use std::path::{Path, PathBuf};

use clap::Args;
use velum_core::config::PipelineDefaults;
use velum_core::presets::{get_looks_dir, load_look, validate_look_name, Fabric};
use velum_core::DEFAULT_STROKE_OPACITY;

use crate::parsers::{parse_stamp, parse_stroke};
use crate::types::RenderSettings;

/// Effect arguments shared between Apply and Batch commands.
///
/// Unset flags fall back to the look (when given), then to the config file
/// defaults.
#[derive(Args, Clone, Debug)]
pub struct EffectArgs {
    /// Fabric preset: estofado, cortina, seda, or poliester
    #[arg(short, long, value_name = "KEY")]
    pub fabric: Option<String>,

    /// Saved look (file path or name under ~/velum/looks)
    #[arg(short, long, value_name = "LOOK")]
    pub look: Option<String>,

    /// Material thickness in fabric units
    #[arg(long, value_name = "FLOAT")]
    pub thickness: Option<f32>,

    /// Effect intensity (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub intensity: Option<f32>,

    /// Shadow lift (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub shadows: Option<f32>,

    /// Black deepen (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub blacks: Option<f32>,

    /// Highlight hold (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub highlights: Option<f32>,

    /// S-curve contrast (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub contrast: Option<f32>,

    /// Local contrast (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub clarity: Option<f32>,

    /// Haze removal (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub dehaze: Option<f32>,

    /// Chroma noise reduction (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub denoise_color: Option<f32>,

    /// Luminance noise reduction (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub denoise_luma: Option<f32>,

    /// Sharpening amount (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub sharpen: Option<f32>,

    /// Sharpening edge threshold (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub sharpen_masking: Option<f32>,

    /// Disable grain
    #[arg(long)]
    pub no_noise: bool,

    /// Grain seed for reproducible output
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Dodge (brighten) stamp in source pixels, repeatable
    #[arg(long, value_name = "X,Y,R")]
    pub dodge: Vec<String>,

    /// Burn (darken) stamp in source pixels, repeatable
    #[arg(long, value_name = "X,Y,R")]
    pub burn: Vec<String>,

    /// Dodge stroke through points in source pixels, repeatable
    #[arg(long, value_name = "X,Y/X,Y/...:R")]
    pub dodge_stroke: Vec<String>,

    /// Burn stroke through points in source pixels, repeatable
    #[arg(long, value_name = "X,Y/X,Y/...:R")]
    pub burn_stroke: Vec<String>,

    /// Opacity of each dodge/burn stamp (0.0-1.0)
    #[arg(long, value_name = "FLOAT", default_value_t = DEFAULT_STROKE_OPACITY)]
    pub stroke_opacity: f32,

    /// Longest side of the processed image; larger inputs are downscaled
    #[arg(long, value_name = "PIXELS")]
    pub max_size: Option<u32>,
}

impl EffectArgs {
    /// Merge flags over the look and config defaults.
    pub fn resolve(&self, defaults: &PipelineDefaults) -> Result<RenderSettings, String> {
        let mut fabric = defaults.fabric;
        let mut controls = defaults.controls;

        if let Some(look_ref) = &self.look {
            let look = load_look(resolve_look_path(look_ref)?)?;
            fabric = look.fabric;
            controls = look.controls;
        }

        if let Some(key) = &self.fabric {
            fabric = key.parse::<Fabric>()?;
        }

        let overrides = [
            (&mut controls.thickness, self.thickness),
            (&mut controls.intensity, self.intensity),
            (&mut controls.shadows, self.shadows),
            (&mut controls.blacks, self.blacks),
            (&mut controls.highlights, self.highlights),
            (&mut controls.contrast, self.contrast),
            (&mut controls.clarity, self.clarity),
            (&mut controls.dehaze, self.dehaze),
            (&mut controls.denoise_color, self.denoise_color),
            (&mut controls.denoise_luma, self.denoise_luma),
            (&mut controls.sharpen, self.sharpen),
            (&mut controls.sharpen_masking, self.sharpen_masking),
        ];
        for (target, value) in overrides {
            if let Some(value) = value {
                *target = value;
            }
        }
        if self.no_noise {
            controls.enable_noise = false;
        }
        controls.sanitize();

        if !(0.0..=1.0).contains(&self.stroke_opacity) {
            return Err(format!(
                "Stroke opacity {} must be in range [0.0, 1.0]",
                self.stroke_opacity
            ));
        }

        let max_size = self.max_size.unwrap_or(defaults.max_render_size);
        if max_size == 0 {
            return Err("Max size must be at least 1 pixel".to_string());
        }

        Ok(RenderSettings {
            fabric,
            controls,
            seed: self.seed.or(defaults.seed),
            dodge: self
                .dodge
                .iter()
                .map(|s| parse_stamp(s))
                .collect::<Result<_, _>>()?,
            burn: self
                .burn
                .iter()
                .map(|s| parse_stamp(s))
                .collect::<Result<_, _>>()?,
            dodge_strokes: self
                .dodge_stroke
                .iter()
                .map(|s| parse_stroke(s))
                .collect::<Result<_, _>>()?,
            burn_strokes: self
                .burn_stroke
                .iter()
                .map(|s| parse_stroke(s))
                .collect::<Result<_, _>>()?,
            stroke_opacity: self.stroke_opacity,
            max_size,
        })
    }
}

/// Treat `look` as a path when it exists, otherwise as a name in the looks directory.
fn resolve_look_path(look: &str) -> Result<PathBuf, String> {
    let path = Path::new(look);
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    // Validate look name before constructing path to prevent path traversal
    validate_look_name(look)?;
    Ok(get_looks_dir()?.join(format!("{}.yml", look)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use velum_core::config::PipelineConfig;
    use velum_core::presets::{save_look, Look};
    use velum_core::EffectControls;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        effect: EffectArgs,
    }

    fn parse(args: &[&str]) -> EffectArgs {
        let mut argv = vec!["velum"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).effect
    }

    #[test]
    fn test_defaults_pass_through() {
        let defaults = PipelineDefaults::default();
        let settings = parse(&[]).resolve(&defaults).unwrap();

        assert_eq!(settings.fabric, Fabric::Cortina);
        assert_eq!(settings.controls, EffectControls::default());
        assert_eq!(settings.max_size, 1700);
        assert!(settings.seed.is_none());
        assert!(settings.dodge.is_empty());
        assert!(settings.dodge_strokes.is_empty());
    }

    #[test]
    fn test_flags_override_and_sanitize() {
        let defaults = PipelineDefaults::default();
        let settings = parse(&[
            "--fabric",
            "seda",
            "--clarity",
            "1.7",
            "--no-noise",
            "--seed",
            "9",
            "--dodge",
            "10,10,5",
            "--dodge",
            "20,20,5",
            "--burn",
            "1,2,3",
        ])
        .resolve(&defaults)
        .unwrap();

        assert_eq!(settings.fabric, Fabric::Seda);
        assert_eq!(settings.controls.clarity, 1.0);
        assert!(!settings.controls.enable_noise);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.dodge.len(), 2);
        assert_eq!(settings.burn.len(), 1);
    }

    #[test]
    fn test_strokes_resolved() {
        let settings = parse(&[
            "--dodge-stroke",
            "0,0/10,10:3",
            "--burn-stroke",
            "5,5:2",
            "--burn-stroke",
            "1,1/2,2/3,3:1",
        ])
        .resolve(&PipelineDefaults::default())
        .unwrap();

        assert_eq!(settings.dodge_strokes.len(), 1);
        assert_eq!(settings.dodge_strokes[0].points, vec![(0.0, 0.0), (10.0, 10.0)]);
        assert_eq!(settings.burn_strokes.len(), 2);
        assert_eq!(settings.burn_strokes[1].points.len(), 3);
    }

    #[test]
    fn test_bad_values_rejected() {
        let defaults = PipelineDefaults::default();
        assert!(parse(&["--fabric", "linen"]).resolve(&defaults).is_err());
        assert!(parse(&["--max-size", "0"]).resolve(&defaults).is_err());
        assert!(parse(&["--stroke-opacity", "1.5"])
            .resolve(&defaults)
            .is_err());
        assert!(parse(&["--burn", "1,2"]).resolve(&defaults).is_err());
        assert!(parse(&["--dodge-stroke", "1,2/3,4"])
            .resolve(&defaults)
            .is_err());
    }

    #[test]
    fn test_look_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soft.yml");
        let look = Look {
            name: "soft".to_string(),
            fabric: Fabric::Estofado,
            controls: EffectControls {
                shadows: 0.4,
                contrast: 0.3,
                ..EffectControls::default()
            },
            notes: None,
        };
        save_look(&look, &path).unwrap();

        let settings = parse(&["--look", path.to_str().unwrap(), "--contrast", "0.1"])
            .resolve(&PipelineDefaults::default())
            .unwrap();

        assert_eq!(settings.fabric, Fabric::Estofado);
        assert_eq!(settings.controls.shadows, 0.4);
        assert_eq!(settings.controls.contrast, 0.1);
    }

    #[test]
    fn test_thickness_kept_when_fabric_overridden() {
        let yaml = "defaults:\n  fabric: cortina\n  controls:\n    thickness: 0.15\n";
        let config = PipelineConfig::from_yaml(yaml).unwrap();

        let settings = parse(&["--fabric", "seda"])
            .resolve(&config.defaults)
            .unwrap();

        // 0.15 is below cortina's range but valid for seda
        assert_eq!(settings.fabric, Fabric::Seda);
        assert_eq!(settings.controls.thickness, 0.15);
    }

    #[test]
    fn test_look_name_traversal_rejected() {
        let err = resolve_look_path("..secret").unwrap_err();
        assert!(err.contains(".."), "{}", err);
    }
}
