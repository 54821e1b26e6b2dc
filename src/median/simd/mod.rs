//! SIMD-accelerated median of 3x3 windows.
//!
//! Wide implementations sort many independent windows at once: one vector
//! register holds the same window position for 16 (SSE4.1/NEON) or 32
//! (AVX2) adjacent pixels, and a fixed compare-exchange network applied
//! with unsigned byte min/max sorts all lanes simultaneously. The network
//! below is a valid 25-comparator sorting network for 9 elements (depth 7):
//! it produces the same total order as a reference sort for every input
//! multiset, so lane 4 after the network is exactly the reference median.
//!
//! The wide paths only cover interior pixels of interior rows, where the
//! full neighborhood is in bounds and no clamping is needed; edge pixels
//! stay on the scalar path.

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::backend::{self, Backend};
use crate::CHANNELS;
use crate::median::median_at;

#[cfg(target_arch = "aarch64")]
pub mod neon;
#[cfg(target_arch = "x86_64")]
pub mod sse;

/// The 25 compare-exchange pairs of the 9-element sorting network, in
/// execution order. Shared by the scalar mirror and the wide backends.
///
/// Stage layout (depth 7):
/// ```text
/// [(0,3) (1,7) (2,5) (4,8)]
/// [(0,7) (2,4) (3,8) (5,6)]
/// [(0,2) (1,3) (4,5) (7,8)]
/// [(1,4) (3,6) (5,7)]
/// [(0,1) (2,4) (3,5) (6,8)]
/// [(2,3) (4,5) (6,7)]
/// [(1,2) (3,4) (5,6)]
/// ```
pub(crate) const SORT9_NETWORK: [(usize, usize); 25] = [
    (0, 3),
    (1, 7),
    (2, 5),
    (4, 8),
    (0, 7),
    (2, 4),
    (3, 8),
    (5, 6),
    (0, 2),
    (1, 3),
    (4, 5),
    (7, 8),
    (1, 4),
    (3, 6),
    (5, 7),
    (0, 1),
    (2, 4),
    (3, 5),
    (6, 8),
    (2, 3),
    (4, 5),
    (6, 7),
    (1, 2),
    (3, 4),
    (5, 6),
];

/// Scalar mirror of the sorting network: fully sorts 9 values using the
/// same compare-exchange sequence the wide backends run lane-wise. Exists
/// so the network can be validated standalone against a reference sort.
#[cfg(test)]
fn sort9(values: &mut [u8; 9]) {
    for (a, b) in SORT9_NETWORK {
        if values[a] > values[b] {
            values.swap(a, b);
        }
    }
}

/// Gather the 3x3 windows of `LANES` adjacent pixels into lane arrays:
/// `lanes[k][lane]` is window position `k` of the window centered on
/// `(x + lane, y)` for the given channel.
///
/// Callers guarantee `1 <= x`, `x + LANES - 1 <= width - 2` and
/// `1 <= y <= height - 2`, so no sample needs clamping.
#[inline]
pub(crate) fn gather_window_lanes<const LANES: usize>(
    source: &[u8],
    x: usize,
    y: usize,
    width: usize,
    channel: usize,
) -> [[u8; LANES]; 9] {
    let mut lanes = [[0u8; LANES]; 9];
    for wy in 0..3 {
        let row_base = (y + wy - 1) * width;
        for wx in 0..3 {
            let column_base = row_base + x + wx - 1;
            let lane_values = &mut lanes[wy * 3 + wx];
            for (lane, value) in lane_values.iter_mut().enumerate() {
                *value = source[(column_base + lane) * CHANNELS + channel];
            }
        }
    }
    lanes
}

/// Median-filter the interior pixels (`x` in `1..width-1`) of interior row
/// `y`, dispatching to the selected backend.
#[inline]
pub fn median_interior_row(
    source: &[u8],
    destination_row: &mut [u8],
    y: usize,
    width: usize,
    height: usize,
) {
    #[cfg(target_arch = "x86_64")]
    {
        match backend::active_backend() {
            Backend::Avx2 if width >= sse::AVX2_LANES + 2 => {
                unsafe { sse::median_interior_row_avx2(source, destination_row, y, width, height) };
                return;
            }
            Backend::Avx2 | Backend::Sse41 if width >= sse::SSE_LANES + 2 => {
                unsafe {
                    sse::median_interior_row_sse41(source, destination_row, y, width, height)
                };
                return;
            }
            _ => {}
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if backend::active_backend() == Backend::Neon && width >= neon::NEON_LANES + 2 {
            unsafe { neon::median_interior_row_neon(source, destination_row, y, width, height) };
            return;
        }
    }

    median_interior_row_scalar(source, destination_row, y, width, height);
}

/// Scalar implementation of the interior-row median.
#[inline]
pub fn median_interior_row_scalar(
    source: &[u8],
    destination_row: &mut [u8],
    y: usize,
    width: usize,
    height: usize,
) {
    for x in 1..width - 1 {
        for channel in 0..CHANNELS {
            destination_row[x * CHANNELS + channel] =
                median_at(source, x, y, width, height, channel);
        }
    }
}
