//! PNG decoding to and encoding from RGBA8 buffers.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use velum_core::PixelBuffer;

/// Decode a PNG file into an RGBA8 buffer.
///
/// Palette, low bit depth, and 16-bit images are normalized to 8 bits per
/// channel first. Grayscale is expanded to RGB; missing alpha becomes opaque.
pub fn decode_png<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, String> {
    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open PNG file: {}", e))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| "Failed to determine PNG buffer size".to_string())?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;

    let (color_type, bit_depth) = (frame_info.color_type, frame_info.bit_depth);
    if bit_depth != png::BitDepth::Eight {
        return Err(format!("Unsupported PNG bit depth: {:?}", bit_depth));
    }

    let bytes = &buf[..frame_info.buffer_size()];
    let (width, height) = (frame_info.width, frame_info.height);

    let data = match color_type {
        png::ColorType::Grayscale => expand_to_rgba(bytes, 1, |px| [px[0], px[0], px[0], 255]),
        png::ColorType::GrayscaleAlpha => {
            expand_to_rgba(bytes, 2, |px| [px[0], px[0], px[0], px[1]])
        }
        png::ColorType::Rgb => expand_to_rgba(bytes, 3, |px| [px[0], px[1], px[2], 255]),
        png::ColorType::Rgba => bytes.to_vec(),
        other => return Err(format!("Unsupported PNG color type: {:?}", other)),
    };

    PixelBuffer::new(width, height, data)
}

fn expand_to_rgba<F>(bytes: &[u8], channels: usize, f: F) -> Vec<u8>
where
    F: Fn(&[u8]) -> [u8; 4],
{
    let mut rgba = Vec::with_capacity(bytes.len() / channels * 4);
    for px in bytes.chunks_exact(channels) {
        rgba.extend_from_slice(&f(px));
    }
    rgba
}

/// Write an RGBA8 buffer as a PNG file.
pub fn encode_png<P: AsRef<Path>>(image: &PixelBuffer, path: P) -> Result<(), String> {
    let file =
        File::create(path.as_ref()).map_err(|e| format!("Failed to create PNG file: {}", e))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| format!("Failed to write PNG header: {}", e))?;
    writer
        .write_image_data(image.data())
        .map_err(|e| format!("Failed to write PNG data: {}", e))?;
    writer
        .finish()
        .map_err(|e| format!("Failed to finish PNG file: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_raw(path: &Path, width: u32, height: u32, color: png::ColorType, data: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_rgba_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let data: Vec<u8> = (0..2 * 3 * 4).map(|i| (i * 10) as u8).collect();
        let image = PixelBuffer::new(2, 3, data.clone()).unwrap();

        encode_png(&image, &path).unwrap();
        let decoded = decode_png(&path).unwrap();

        assert_eq!(decoded.width(), 2);
        assert_eq!(decoded.height(), 3);
        assert_eq!(decoded.data(), &data[..]);
    }

    #[test]
    fn test_gray_expands_to_opaque_rgba() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");
        write_raw(&path, 2, 1, png::ColorType::Grayscale, &[10, 200]);

        let decoded = decode_png(&path).unwrap();
        assert_eq!(decoded.data(), &[10, 10, 10, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn test_gray_alpha_and_rgb() {
        let dir = tempdir().unwrap();

        let ga = dir.path().join("ga.png");
        write_raw(&ga, 1, 1, png::ColorType::GrayscaleAlpha, &[50, 128]);
        assert_eq!(decode_png(&ga).unwrap().data(), &[50, 50, 50, 128]);

        let rgb = dir.path().join("rgb.png");
        write_raw(&rgb, 1, 1, png::ColorType::Rgb, &[1, 2, 3]);
        assert_eq!(decode_png(&rgb).unwrap().data(), &[1, 2, 3, 255]);
    }

    #[test]
    fn test_missing_file_errors() {
        let err = decode_png("/nonexistent/velum.png").unwrap_err();
        assert!(err.contains("Failed to open"), "{}", err);
    }
}
