//! Spatial median filtering for salt-and-pepper noise reduction.
//!
//! Each output channel is the median of a `WINDOW_DIM x WINDOW_DIM`
//! neighborhood sampled with clamp-to-edge semantics, so border pixels
//! reuse edge values. The filter reads from a source buffer and writes a
//! distinct destination buffer: computing one output pixel needs untouched
//! neighbor values that an in-place write would have already overwritten.

pub mod simd;

#[cfg(test)]
mod tests;

use rayon::prelude::*;

use crate::CHANNELS;
use crate::common::parallel;
use crate::sampling::sample_pixel;

/// Configured median window size. Even values are forced odd so the window
/// always has an exact middle element.
pub const MEDIAN_WINDOW_SIZE: usize = 3;

const fn force_odd(size: usize) -> usize {
    if size % 2 == 0 { size + 1 } else { size }
}

/// Window dimension after the forced-odd correction.
pub(crate) const WINDOW_DIM: usize = force_odd(MEDIAN_WINDOW_SIZE);
/// Number of samples in one window.
pub(crate) const WINDOW_LEN: usize = WINDOW_DIM * WINDOW_DIM;
/// Offset from the window origin to its center.
pub(crate) const WINDOW_RADIUS: usize = WINDOW_DIM / 2;

/// Median of a gathered sample set. Sorts in place.
///
/// Odd counts take the exact middle element. Even counts average the two
/// middle elements, rounding down in integer arithmetic; the forced-odd
/// window rule makes that branch unreachable from the kernels, but it stays
/// correct for direct callers.
#[inline]
pub(crate) fn median_of(values: &mut [u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    let middle = values.len() / 2;
    if values.len() % 2 == 1 {
        values[middle]
    } else {
        ((values[middle - 1] as u16 + values[middle] as u16) / 2) as u8
    }
}

/// Median of the window centered on `(x, y)` for one channel, with every
/// sample resolved through the clamp-to-edge sampling utility.
#[inline]
pub(crate) fn median_at(
    source: &[u8],
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    channel: usize,
) -> u8 {
    let mut window = [0u8; WINDOW_LEN];
    let mut sample = 0;
    for wy in 0..WINDOW_DIM {
        for wx in 0..WINDOW_DIM {
            let sx = x as isize + wx as isize - WINDOW_RADIUS as isize;
            let sy = y as isize + wy as isize - WINDOW_RADIUS as isize;
            window[sample] = sample_pixel(source, sx, sy, width, height)[channel];
            sample += 1;
        }
    }
    median_of(&mut window)
}

/// Write the median-filtered pixel at `(x, y)` to `destination` at `position`.
///
/// `position` is the byte offset of the output pixel's blue channel. Source
/// and destination must be distinct buffers; the caller guarantees the
/// center pixel is in bounds.
pub fn median_pixel(
    source: &[u8],
    destination: &mut [u8],
    position: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) {
    debug_assert!(
        position + CHANNELS <= destination.len(),
        "pixel position out of bounds"
    );
    debug_assert!(x < width && y < height, "center pixel out of bounds");

    for channel in 0..CHANNELS {
        destination[position + channel] = median_at(source, x, y, width, height, channel);
    }
}

/// Median-filter a whole image from `source` into `destination`,
/// processing row chunks in parallel.
///
/// `source` must not alias `destination` and is only read during the pass.
pub fn median_image(source: &[u8], destination: &mut [u8], width: usize, height: usize) {
    assert_eq!(
        source.len(),
        width * height * CHANNELS,
        "source length must equal width * height * {CHANNELS}"
    );
    assert_eq!(
        destination.len(),
        source.len(),
        "destination length must equal source length"
    );
    if source.is_empty() {
        return;
    }

    let row_bytes = width * CHANNELS;
    let chunk_rows = parallel::rows_per_chunk(height);
    destination
        .par_chunks_mut(row_bytes * chunk_rows)
        .enumerate()
        .for_each(|(chunk_index, chunk)| {
            let y_start = chunk_index * chunk_rows;
            for (row_index, destination_row) in chunk.chunks_mut(row_bytes).enumerate() {
                filter_row(source, destination_row, y_start + row_index, width, height);
            }
        });
}

/// Filter one row: wide batch for interior pixels, clamped scalar at the
/// edge columns. Edge rows (and window sizes the network does not cover)
/// take the scalar path for every pixel.
fn filter_row(source: &[u8], destination_row: &mut [u8], y: usize, width: usize, height: usize) {
    let interior = WINDOW_DIM == 3 && y >= 1 && y + 1 < height && width >= 2;
    if !interior {
        filter_row_scalar(source, destination_row, y, width, height);
        return;
    }

    for channel in 0..CHANNELS {
        destination_row[channel] = median_at(source, 0, y, width, height, channel);
        destination_row[(width - 1) * CHANNELS + channel] =
            median_at(source, width - 1, y, width, height, channel);
    }
    simd::median_interior_row(source, destination_row, y, width, height);
}

/// Scalar path covering every pixel of the row with clamped sampling.
fn filter_row_scalar(
    source: &[u8],
    destination_row: &mut [u8],
    y: usize,
    width: usize,
    height: usize,
) {
    for x in 0..width {
        for channel in 0..CHANNELS {
            destination_row[x * CHANNELS + channel] =
                median_at(source, x, y, width, height, channel);
        }
    }
}
