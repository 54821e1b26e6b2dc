//! NEON implementation of the interior-row median on aarch64.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use super::{SORT9_NETWORK, gather_window_lanes};
use crate::CHANNELS;
use crate::median::{WINDOW_DIM, median_at};

/// Windows sorted per NEON network pass.
pub(crate) const NEON_LANES: usize = 16;

/// Median-filter interior pixels of interior row `y` using NEON.
///
/// # Safety
/// - Caller must ensure this is running on aarch64 with NEON.
/// - `width` must be >= `NEON_LANES + 2` and `1 <= y <= height - 2`.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn median_interior_row_neon(
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
        while x + NEON_LANES + 1 <= width {
            for channel in 0..CHANNELS {
                let lanes = gather_window_lanes::<NEON_LANES>(source, x, y, width, channel);

                let mut window = [vdupq_n_u8(0); 9];
                for (position, lane_values) in window.iter_mut().zip(&lanes) {
                    *position = vld1q_u8(lane_values.as_ptr());
                }

                // compare-exchange: a = min(a, b), b = max(a, b)
                for (a, b) in SORT9_NETWORK {
                    let low = vminq_u8(window[a], window[b]);
                    let high = vmaxq_u8(window[a], window[b]);
                    window[a] = low;
                    window[b] = high;
                }

                // After the full sort, register 4 holds every lane's median.
                let mut medians = [0u8; NEON_LANES];
                vst1q_u8(medians.as_mut_ptr(), window[4]);
                for (lane, value) in medians.into_iter().enumerate() {
                    destination_row[(x + lane) * CHANNELS + channel] = value;
                }
            }
            x += NEON_LANES;
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
