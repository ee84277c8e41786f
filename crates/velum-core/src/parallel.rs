//! Parallelization helpers for pixel processing
//!
//! Wraps the "parallel above a size threshold, sequential below it" pattern so
//! the blur kernel and the per-pixel pipeline pass share one dispatch rule.
//! Both paths visit the same chunks with the same indices, so results are
//! identical whichever path runs.

use rayon::prelude::*;

/// Pixel count above which work is spread across the rayon pool
pub const PARALLEL_THRESHOLD: usize = 65_536;

/// Parallel for-each over mutable, indexed chunks with threshold-based dispatch.
///
/// `work_units` is the number of elements the threshold is compared against
/// (typically pixels), which may differ from the chunk count when each chunk is
/// a whole row.
///
/// # Example
/// ```ignore
/// parallel_for_each_indexed_mut(&mut out, width * 4, width * height, |y, row| {
///     // fill row `y`
/// });
/// ```
pub fn parallel_for_each_indexed_mut<T, F>(
    data: &mut [T],
    chunk_size: usize,
    work_units: usize,
    f: F,
) where
    T: Send + Sync,
    F: Fn(usize, &mut [T]) + Sync,
{
    for_each_indexed_mut_above(data, chunk_size, work_units, PARALLEL_THRESHOLD, f);
}

/// Same as [`parallel_for_each_indexed_mut`] with an explicit threshold.
pub(crate) fn for_each_indexed_mut_above<T, F>(
    data: &mut [T],
    chunk_size: usize,
    work_units: usize,
    threshold: usize,
    f: F,
) where
    T: Send + Sync,
    F: Fn(usize, &mut [T]) + Sync,
{
    if chunk_size == 0 {
        return;
    }

    if work_units >= threshold {
        data.par_chunks_mut(chunk_size)
            .enumerate()
            .for_each(|(index, chunk)| f(index, chunk));
    } else {
        for (index, chunk) in data.chunks_mut(chunk_size).enumerate() {
            f(index, chunk);
        }
    }
}

/// Parallel for-each over mutable RGBA pixels, passing the pixel index.
pub fn parallel_for_each_pixel_mut<F>(data: &mut [u8], f: F)
where
    F: Fn(usize, &mut [u8]) + Sync,
{
    for_each_pixel_mut_above(data, PARALLEL_THRESHOLD, f);
}

pub(crate) fn for_each_pixel_mut_above<F>(data: &mut [u8], threshold: usize, f: F)
where
    F: Fn(usize, &mut [u8]) + Sync,
{
    let pixels = data.len() / 4;
    for_each_indexed_mut_above(data, 4, pixels, threshold, f);
}
