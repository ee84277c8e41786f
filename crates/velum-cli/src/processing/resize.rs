//! Fit images within the render size limit.

use velum_core::parallel::parallel_for_each_indexed_mut;
use velum_core::PixelBuffer;

/// Dimensions that fit within `max_size` on the longest side.
///
/// Aspect ratio is preserved, images are never upscaled, and each side is at
/// least one pixel.
pub fn fit_dimensions(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    let max_size = max_size.max(1);
    let longest = width.max(height);
    if longest <= max_size {
        return (width, height);
    }

    let scale = max_size as f64 / longest as f64;
    let fit = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_size);
    (fit(width), fit(height))
}

/// Downscale `image` with area averaging so it fits within `max_size`.
///
/// Returns a copy when no resize is needed. All four channels are averaged.
pub fn fit_within(image: &PixelBuffer, max_size: u32) -> Result<PixelBuffer, String> {
    let (sw, sh) = (image.width() as usize, image.height() as usize);
    let (dw, dh) = fit_dimensions(image.width(), image.height(), max_size);
    if (dw as usize, dh as usize) == (sw, sh) {
        return Ok(image.clone());
    }

    let (dw, dh) = (dw as usize, dh as usize);
    let src = image.data();
    let mut out = vec![0u8; dw * dh * 4];

    // Source span [start, end) covered by destination index `i`
    let span = |i: usize, src_len: usize, dst_len: usize| {
        let start = i * src_len / dst_len;
        let end = ((i + 1) * src_len / dst_len).max(start + 1).min(src_len);
        (start, end)
    };

    parallel_for_each_indexed_mut(&mut out, dw * 4, dw * dh, |y, row| {
        let (y0, y1) = span(y, sh, dh);
        for x in 0..dw {
            let (x0, x1) = span(x, sw, dw);
            let mut sum = [0u64; 4];
            for sy in y0..y1 {
                for sx in x0..x1 {
                    let i = (sy * sw + sx) * 4;
                    for c in 0..4 {
                        sum[c] += src[i + c] as u64;
                    }
                }
            }
            let count = ((y1 - y0) * (x1 - x0)) as u64;
            for c in 0..4 {
                row[x * 4 + c] = ((sum[c] + count / 2) / count) as u8;
            }
        }
    });

    PixelBuffer::new(dw as u32, dh as u32, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_dimensions() {
        assert_eq!(fit_dimensions(800, 600, 1700), (800, 600));
        assert_eq!(fit_dimensions(3400, 1700, 1700), (1700, 850));
        assert_eq!(fit_dimensions(1000, 4000, 1000), (250, 1000));
        assert_eq!(fit_dimensions(5000, 2, 100), (100, 1));
    }

    #[test]
    fn test_small_image_unchanged() {
        let image = PixelBuffer::filled(4, 4, [9, 8, 7, 255]).unwrap();
        let fitted = fit_within(&image, 10).unwrap();
        assert_eq!(fitted, image);
    }

    #[test]
    fn test_area_average_halves() {
        // 4x2 with left half black, right half white
        let mut data = Vec::new();
        for _ in 0..2 {
            for x in 0..4 {
                let v = if x < 2 { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let image = PixelBuffer::new(4, 2, data).unwrap();
        let fitted = fit_within(&image, 2).unwrap();

        assert_eq!(fitted.width(), 2);
        assert_eq!(fitted.height(), 1);
        assert_eq!(fitted.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(fitted.pixel(1, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_average_rounds() {
        let image = PixelBuffer::new(2, 1, vec![10, 0, 0, 255, 11, 0, 0, 0]).unwrap();
        let fitted = fit_within(&image, 1).unwrap();
        assert_eq!(fitted.pixel(0, 0), Some([11, 0, 0, 128]));
    }
}
