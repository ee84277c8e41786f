//! Separable box blur over interleaved RGBA

use crate::parallel::{for_each_indexed_mut_above, PARALLEL_THRESHOLD};

/// Blur radius used as the denoise and sharpen reference
pub const DENOISE_REFERENCE_RADIUS: u32 = 1;

/// Blur radius used as the clarity and dehaze reference
pub const CLARITY_REFERENCE_RADIUS: u32 = 2;

/// Mean-filter an RGBA buffer with a `(2r+1)`-wide box, horizontally then vertically.
///
/// The window shrinks at the borders instead of wrapping or extending edge
/// pixels, all four channels (alpha included) are filtered, and each pass
/// truncates its mean to an integer. A radius of zero returns an exact copy.
pub fn box_blur_rgba(src: &[u8], width: usize, height: usize, radius: u32) -> Vec<u8> {
    box_blur_rgba_above(src, width, height, radius, PARALLEL_THRESHOLD)
}

/// [`box_blur_rgba`] with rows spread across rayon once `threshold` pixels are reached.
pub(crate) fn box_blur_rgba_above(
    src: &[u8],
    width: usize,
    height: usize,
    radius: u32,
    threshold: usize,
) -> Vec<u8> {
    let r = radius as usize;
    if r == 0 || width == 0 || height == 0 {
        return src.to_vec();
    }

    let row_len = width * 4;
    let pixels = width * height;

    let mut tmp = vec![0u8; src.len()];
    for_each_indexed_mut_above(&mut tmp, row_len, pixels, threshold, |y, row| {
        let src_row = &src[y * row_len..(y + 1) * row_len];
        for x in 0..width {
            let x0 = x.saturating_sub(r);
            let x1 = (x + r).min(width - 1);
            let mut sums = [0u32; 4];
            for xi in x0..=x1 {
                let i = xi * 4;
                sums[0] += src_row[i] as u32;
                sums[1] += src_row[i + 1] as u32;
                sums[2] += src_row[i + 2] as u32;
                sums[3] += src_row[i + 3] as u32;
            }
            let count = (x1 - x0 + 1) as u32;
            let o = x * 4;
            for c in 0..4 {
                row[o + c] = (sums[c] / count) as u8;
            }
        }
    });

    let mut out = vec![0u8; src.len()];
    for_each_indexed_mut_above(&mut out, row_len, pixels, threshold, |y, row| {
        let y0 = y.saturating_sub(r);
        let y1 = (y + r).min(height - 1);
        let count = (y1 - y0 + 1) as u32;
        for x in 0..width {
            let mut sums = [0u32; 4];
            for yi in y0..=y1 {
                let i = yi * row_len + x * 4;
                sums[0] += tmp[i] as u32;
                sums[1] += tmp[i + 1] as u32;
                sums[2] += tmp[i + 2] as u32;
                sums[3] += tmp[i + 3] as u32;
            }
            let o = x * 4;
            for c in 0..4 {
                row[o + c] = (sums[c] / count) as u8;
            }
        }
    });

    out
}
