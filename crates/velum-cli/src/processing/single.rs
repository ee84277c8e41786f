//! Single image processing functions.

use std::path::Path;

use velum_core::config::is_verbose;
use velum_core::{process_image_seeded, EffectParameters, Mask, PixelBuffer};

use crate::io::{decode_png, encode_png};
use crate::parsers::{Stamp, Stroke};
use crate::types::RenderSettings;

/// Summary of one rendered file.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub source_size: (u32, u32),
    pub output_size: (u32, u32),
    pub seed: u64,
}

/// Fit, mask, and render an in-memory image.
///
/// Stamps and strokes are given in source pixels and scaled along with the image.
pub fn render_image(
    image: &PixelBuffer,
    settings: &RenderSettings,
    seed: u64,
) -> Result<PixelBuffer, String> {
    let fitted = super::fit_within(image, settings.max_size)?;
    let scale = fitted.width() as f32 / image.width() as f32;

    let opacity = settings.stroke_opacity;
    let dodge = build_mask(&fitted, &settings.dodge, &settings.dodge_strokes, scale, opacity);
    let burn = build_mask(&fitted, &settings.burn, &settings.burn_strokes, scale, opacity);

    let mut params = EffectParameters::new(settings.fabric, settings.controls);
    if let Some(mask) = &dodge {
        params = params.with_dodge_mask(mask);
    }
    if let Some(mask) = &burn {
        params = params.with_burn_mask(mask);
    }

    Ok(process_image_seeded(&fitted, &params, seed))
}

/// Rasterize stamps, then strokes, into a mask sized like `image`; `None` when there are none.
fn build_mask(
    image: &PixelBuffer,
    stamps: &[Stamp],
    strokes: &[Stroke],
    scale: f32,
    opacity: f32,
) -> Option<Mask> {
    if stamps.is_empty() && strokes.is_empty() {
        return None;
    }
    let mut mask = Mask::empty(image.width(), image.height());
    for stamp in stamps {
        let s = stamp.scaled(scale);
        mask.stamp(s.x, s.y, s.radius, opacity);
    }
    for stroke in strokes {
        let s = stroke.scaled(scale);
        mask.stroke(&s.points, s.radius, opacity);
    }
    Some(mask)
}

/// Decode, render, and write one file.
pub fn render_file(
    input: &Path,
    output: &Path,
    settings: &RenderSettings,
    seed: u64,
) -> Result<RenderReport, String> {
    let image = decode_png(input)
        .map_err(|e| format!("{}: {}", input.display(), e))?;
    let rendered = render_image(&image, settings, seed)?;

    if is_verbose() && rendered.width() != image.width() {
        eprintln!(
            "[velum] {} downscaled {}x{} -> {}x{}",
            input.display(),
            image.width(),
            image.height(),
            rendered.width(),
            rendered.height()
        );
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create output directory: {}", e))?;
        }
    }
    encode_png(&rendered, output)?;

    Ok(RenderReport {
        source_size: (image.width(), image.height()),
        output_size: (rendered.width(), rendered.height()),
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use velum_core::{EffectControls, Fabric};

    fn settings() -> RenderSettings {
        RenderSettings {
            fabric: Fabric::Cortina,
            controls: EffectControls::neutral(),
            seed: None,
            dodge: Vec::new(),
            burn: Vec::new(),
            dodge_strokes: Vec::new(),
            burn_strokes: Vec::new(),
            stroke_opacity: 0.15,
            max_size: 1700,
        }
    }

    fn gray(size: u32, value: u8) -> PixelBuffer {
        PixelBuffer::filled(size, size, [value, value, value, 255]).unwrap()
    }

    #[test]
    fn test_render_downscales() {
        let mut s = settings();
        s.max_size = 8;
        let out = render_image(&gray(32, 100), &s, 1).unwrap();
        assert_eq!((out.width(), out.height()), (8, 8));
    }

    #[test]
    fn test_dodge_stamp_brightens_center_only() {
        let mut s = settings();
        s.dodge = vec![Stamp {
            x: 16.0,
            y: 16.0,
            radius: 4.0,
        }];
        s.stroke_opacity = 1.0;

        let image = gray(32, 100);
        let plain = render_image(&image, &settings(), 1).unwrap();
        let dodged = render_image(&image, &s, 1).unwrap();

        let center = dodged.pixel(16, 16).unwrap()[0];
        assert!(center > plain.pixel(16, 16).unwrap()[0], "center {}", center);
        assert_eq!(dodged.pixel(0, 0), plain.pixel(0, 0));
    }

    #[test]
    fn test_burn_stroke_darkens_along_path() {
        let mut s = settings();
        s.burn_strokes = vec![Stroke {
            points: vec![(8.0, 32.0), (56.0, 32.0)],
            radius: 3.0,
        }];
        s.stroke_opacity = 1.0;

        let image = gray(64, 160);
        let plain = render_image(&image, &settings(), 1).unwrap();
        let burned = render_image(&image, &s, 1).unwrap();

        for x in [8, 20, 32, 44, 56] {
            let on_path = burned.pixel(x, 32).unwrap()[0];
            assert!(on_path < plain.pixel(x, 32).unwrap()[0], "x={} value {}", x, on_path);
        }
        assert_eq!(burned.pixel(32, 8), plain.pixel(32, 8));
    }

    #[test]
    fn test_stroke_scales_with_downscale() {
        let mut s = settings();
        s.max_size = 32;
        s.dodge_strokes = vec![Stroke {
            points: vec![(16.0, 32.0), (48.0, 32.0)],
            radius: 4.0,
        }];
        s.stroke_opacity = 1.0;

        let image = gray(64, 100);
        let mut plain_settings = settings();
        plain_settings.max_size = 32;
        let plain = render_image(&image, &plain_settings, 1).unwrap();
        let dodged = render_image(&image, &s, 1).unwrap();

        // Source path (16..48, 32) lands on (8..24, 16) after halving
        assert!(dodged.pixel(16, 16).unwrap()[0] > plain.pixel(16, 16).unwrap()[0]);
        assert_eq!(dodged.pixel(28, 16), plain.pixel(28, 16));
    }

    #[test]
    fn test_render_file_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("nested").join("in_velum.png");
        encode_png(&gray(6, 80), &input).unwrap();

        let report = render_file(&input, &output, &settings(), 5).unwrap();
        assert_eq!(report.output_size, (6, 6));
        assert_eq!(report.seed, 5);

        let written = decode_png(&output).unwrap();
        assert_eq!(written.width(), 6);
        assert!(written.data().chunks_exact(4).all(|px| px[3] == 255));
    }
}
