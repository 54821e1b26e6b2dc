//! Linear brightness/contrast adjustment.
//!
//! Per channel: `output = saturate(input * contrast + brightness)`. Channels
//! are independent; `contrast == 1.0, brightness == 0.0` is the identity.
//! The transform mutates pixels in place.

pub mod simd;


use rayon::prelude::*;

use crate::CHANNELS;
use crate::common::parallel;
use crate::saturate::saturate;

/// Adjust the 3 channels of one pixel in place.
///
/// `position` is the byte offset of the pixel's blue channel; the caller
/// guarantees `position + 2 < pixels.len()`.
#[inline]
pub fn brightness_contrast_pixel(
    pixels: &mut [u8],
    position: usize,
    brightness: f32,
    contrast: f32,
) {
    debug_assert!(
        position + CHANNELS <= pixels.len(),
        "pixel position out of bounds"
    );
    for channel in &mut pixels[position..position + CHANNELS] {
        *channel = saturate(*channel as f32 * contrast + brightness);
    }
}

/// Adjust a contiguous span of channel bytes in place.
///
/// The formula is channel-uniform, so a row is just a span of
/// `width * 3` bytes. Dispatches to the selected backend.
#[inline]
pub fn brightness_contrast_row(row: &mut [u8], brightness: f32, contrast: f32) {
    simd::brightness_contrast_span(row, brightness, contrast);
}

/// Adjust a whole image in place, processing row chunks in parallel.
pub fn brightness_contrast_image(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    brightness: f32,
    contrast: f32,
) {
    assert_eq!(
        pixels.len(),
        width * height * CHANNELS,
        "pixel buffer length must equal width * height * {CHANNELS}"
    );
    if pixels.is_empty() {
        return;
    }

    let chunk_len = width * CHANNELS * parallel::rows_per_chunk(height);
    pixels.par_chunks_mut(chunk_len).for_each(|chunk| {
        simd::brightness_contrast_span(chunk, brightness, contrast);
    });
}
