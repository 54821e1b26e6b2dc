//! SSE4.1 implementation of the sepia span.
//!
//! Processes 4 pixels per iteration: one 16-byte load covers the group's
//! 12 channel bytes, byte shuffles split them into blue/green/red f32
//! lanes, the three matrix rows are evaluated, and shuffles interleave the
//! saturated bytes back into place.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::CHANNELS;
use crate::sepia::{SEPIA_COEFFICIENTS, sepia_pixel};

/// Pixels consumed per wide iteration.
const GROUP_PIXELS: usize = 4;
/// Bytes consumed per wide iteration.
const GROUP_BYTES: usize = GROUP_PIXELS * CHANNELS;

/// Sepia-tone a span of whole pixels using SSE4.1, 4 pixels per operation.
///
/// # Safety
/// - Caller must ensure SSE4.1 is available.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.1")]
pub unsafe fn sepia_span_sse41(row: &mut [u8]) {
    unsafe {
        // Byte index of each channel within a 4-pixel BGR group, spread into
        // the low byte of one dword lane per pixel.
        let gather_blue = _mm_setr_epi8(0, -1, -1, -1, 3, -1, -1, -1, 6, -1, -1, -1, 9, -1, -1, -1);
        let gather_green =
            _mm_setr_epi8(1, -1, -1, -1, 4, -1, -1, -1, 7, -1, -1, -1, 10, -1, -1, -1);
        let gather_red =
            _mm_setr_epi8(2, -1, -1, -1, 5, -1, -1, -1, 8, -1, -1, -1, 11, -1, -1, -1);

        // The reverse mapping: dword lane bytes back to interleaved positions.
        let scatter_blue =
            _mm_setr_epi8(0, -1, -1, 4, -1, -1, 8, -1, -1, 12, -1, -1, -1, -1, -1, -1);
        let scatter_green =
            _mm_setr_epi8(-1, 0, -1, -1, 4, -1, -1, 8, -1, -1, 12, -1, -1, -1, -1, -1);
        let scatter_red =
            _mm_setr_epi8(-1, -1, 0, -1, -1, 4, -1, -1, 8, -1, -1, 12, -1, -1, -1, -1);

        let [blue_row, green_row, red_row] = SEPIA_COEFFICIENTS;

        let zero = _mm_setzero_ps();
        let max = _mm_set1_ps(255.0);

        let ptr = row.as_mut_ptr();
        let mut base = 0;
        // The 16-byte load reads 4 bytes past the group; stop while they
        // are still inside the span and leave the rest to the scalar tail.
        while base + 16 <= row.len() {
            let chunk = _mm_loadu_si128(ptr.add(base) as *const __m128i);

            let blue = _mm_cvtepi32_ps(_mm_shuffle_epi8(chunk, gather_blue));
            let green = _mm_cvtepi32_ps(_mm_shuffle_epi8(chunk, gather_green));
            let red = _mm_cvtepi32_ps(_mm_shuffle_epi8(chunk, gather_red));

            let mut out = _mm_setzero_si128();
            for (coefficients, scatter) in [
                (blue_row, scatter_blue),
                (green_row, scatter_green),
                (red_row, scatter_red),
            ] {
                let weighted = _mm_add_ps(
                    _mm_add_ps(
                        _mm_mul_ps(red, _mm_set1_ps(coefficients[0])),
                        _mm_mul_ps(green, _mm_set1_ps(coefficients[1])),
                    ),
                    _mm_mul_ps(blue, _mm_set1_ps(coefficients[2])),
                );
                let saturated = _mm_cvttps_epi32(_mm_min_ps(_mm_max_ps(weighted, zero), max));
                out = _mm_or_si128(out, _mm_shuffle_epi8(saturated, scatter));
            }

            let mut interleaved = [0u8; 16];
            _mm_storeu_si128(interleaved.as_mut_ptr() as *mut __m128i, out);
            std::ptr::copy_nonoverlapping(interleaved.as_ptr(), ptr.add(base), GROUP_BYTES);

            base += GROUP_BYTES;
        }

        for position in (base..row.len()).step_by(CHANNELS) {
            sepia_pixel(row, position);
        }
    }
}
