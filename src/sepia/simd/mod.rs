//! SIMD-accelerated sepia spans.
//!
//! The wide paths deinterleave a group of pixels into per-channel f32
//! lanes, evaluate the three matrix rows with the same left-to-right
//! multiply/add order as the scalar kernel (no FMA), then interleave the
//! saturated results back. On x86_64 the 128-bit span is used for both the
//! Sse41 and Avx2 selections: the byte deinterleave dominates, so a 256-bit
//! variant buys nothing while doubling the shuffle tables.

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::backend::{self, Backend};
use crate::CHANNELS;
use crate::sepia::sepia_pixel;

#[cfg(target_arch = "aarch64")]
pub mod neon;
#[cfg(target_arch = "x86_64")]
pub mod sse;

/// Sepia-tone a span of whole pixels, dispatching to the selected backend.
#[inline]
pub fn sepia_span(row: &mut [u8]) {
    #[cfg(target_arch = "x86_64")]
    {
        if matches!(
            backend::active_backend(),
            Backend::Sse41 | Backend::Avx2
        ) {
            unsafe { sse::sepia_span_sse41(row) };
            return;
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if backend::active_backend() == Backend::Neon {
            unsafe { neon::sepia_span_neon(row) };
            return;
        }
    }

    sepia_span_scalar(row);
}

/// Scalar reference implementation of the sepia span.
#[inline]
pub fn sepia_span_scalar(row: &mut [u8]) {
    for position in (0..row.len()).step_by(CHANNELS) {
        sepia_pixel(row, position);
    }
}
