//! SSE4.1 and AVX2 implementations of the interior-row median.
//!
//! Each vector register holds one window position across 16 (SSE4.1) or 32
//! (AVX2) adjacent pixels; the sorting network runs on all lanes at once
//! with unsigned byte min/max, and lane 4 of the sorted registers is the
//! median of every window.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{SORT9_NETWORK, gather_window_lanes};
use crate::CHANNELS;
use crate::median::{WINDOW_DIM, median_at};

/// Windows sorted per SSE4.1 network pass.
pub(crate) const SSE_LANES: usize = 16;
/// Windows sorted per AVX2 network pass.
pub(crate) const AVX2_LANES: usize = 32;

/// Median-filter interior pixels of interior row `y` using SSE4.1.
///
/// # Safety
/// - Caller must ensure SSE4.1 is available.
/// - `width` must be >= `SSE_LANES + 2` and `1 <= y <= height - 2`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.1")]
pub unsafe fn median_interior_row_sse41(
    source: &[u8],
    destination_row: &mut [u8],
    y: usize,
    width: usize,
    height: usize,
) {
    unsafe {
        debug_assert_eq!(WINDOW_DIM, 3, "network is sized for 3x3 windows");
        debug_assert!(y >= 1 && y + 1 < height, "row must be interior");

        let mut x = 1;
        while x + SSE_LANES + 1 <= width {
            for channel in 0..CHANNELS {
                let lanes = gather_window_lanes::<SSE_LANES>(source, x, y, width, channel);

                let mut window = [_mm_setzero_si128(); 9];
                for (position, lane_values) in window.iter_mut().zip(&lanes) {
                    *position = _mm_loadu_si128(lane_values.as_ptr() as *const __m128i);
                }

                // compare-exchange: a = min(a, b), b = max(a, b)
                for (a, b) in SORT9_NETWORK {
                    let low = _mm_min_epu8(window[a], window[b]);
                    let high = _mm_max_epu8(window[a], window[b]);
                    window[a] = low;
                    window[b] = high;
                }

                // After the full sort, register 4 holds every lane's median.
                let mut medians = [0u8; SSE_LANES];
                _mm_storeu_si128(medians.as_mut_ptr() as *mut __m128i, window[4]);
                for (lane, value) in medians.into_iter().enumerate() {
                    destination_row[(x + lane) * CHANNELS + channel] = value;
                }
            }
            x += SSE_LANES;
        }

        // Remainder pixels with scalar code.
        for x in x..width - 1 {
            for channel in 0..CHANNELS {
                destination_row[x * CHANNELS + channel] =
                    median_at(source, x, y, width, height, channel);
            }
        }
    }
}

/// Median-filter interior pixels of interior row `y` using AVX2.
///
/// # Safety
/// - Caller must ensure AVX2 is available.
/// - `width` must be >= `AVX2_LANES + 2` and `1 <= y <= height - 2`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn median_interior_row_avx2(
    source: &[u8],
    destination_row: &mut [u8],
    y: usize,
    width: usize,
    height: usize,
) {
    unsafe {
        debug_assert_eq!(WINDOW_DIM, 3, "network is sized for 3x3 windows");
        debug_assert!(y >= 1 && y + 1 < height, "row must be interior");

        let mut x = 1;
        while x + AVX2_LANES + 1 <= width {
            for channel in 0..CHANNELS {
                let lanes = gather_window_lanes::<AVX2_LANES>(source, x, y, width, channel);

                let mut window = [_mm256_setzero_si256(); 9];
                for (position, lane_values) in window.iter_mut().zip(&lanes) {
                    *position = _mm256_loadu_si256(lane_values.as_ptr() as *const __m256i);
                }

                for (a, b) in SORT9_NETWORK {
                    let low = _mm256_min_epu8(window[a], window[b]);
                    let high = _mm256_max_epu8(window[a], window[b]);
                    window[a] = low;
                    window[b] = high;
                }

                let mut medians = [0u8; AVX2_LANES];
                _mm256_storeu_si256(medians.as_mut_ptr() as *mut __m256i, window[4]);
                for (lane, value) in medians.into_iter().enumerate() {
                    destination_row[(x + lane) * CHANNELS + channel] = value;
                }
            }
            x += AVX2_LANES;
        }

        for x in x..width - 1 {
            for channel in 0..CHANNELS {
                destination_row[x * CHANNELS + channel] =
                    median_at(source, x, y, width, height, channel);
            }
        }
    }
}
