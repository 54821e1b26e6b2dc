//! NEON implementation of the sepia span on aarch64.
//!
//! `vld3`/`vst3` deinterleave and reinterleave 8 BGR pixels per iteration,
//! which removes the shuffle tables the x86 path needs.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use crate::CHANNELS;
use crate::sepia::{SEPIA_COEFFICIENTS, sepia_pixel};

/// Pixels consumed per wide iteration.
const GROUP_PIXELS: usize = 8;
/// Bytes consumed per wide iteration.
const GROUP_BYTES: usize = GROUP_PIXELS * CHANNELS;

/// Widen the low 4 lanes of an 8-lane byte vector to f32.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
unsafe fn widen_low(v: uint8x8_t) -> float32x4_t {
    vcvtq_f32_u32(vmovl_u16(vget_low_u16(vmovl_u8(v))))
}

/// Widen the high 4 lanes of an 8-lane byte vector to f32.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
unsafe fn widen_high(v: uint8x8_t) -> float32x4_t {
    vcvtq_f32_u32(vmovl_u16(vget_high_u16(vmovl_u8(v))))
}

/// Evaluate one matrix row over 4 lanes with scalar-identical operation order.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
unsafe fn matrix_row(
    red: float32x4_t,
    green: float32x4_t,
    blue: float32x4_t,
    coefficients: [f32; 3],
) -> uint32x4_t {
    let weighted = vaddq_f32(
        vaddq_f32(
            vmulq_f32(red, vdupq_n_f32(coefficients[0])),
            vmulq_f32(green, vdupq_n_f32(coefficients[1])),
        ),
        vmulq_f32(blue, vdupq_n_f32(coefficients[2])),
    );
    let clamped = vminq_f32(vmaxq_f32(weighted, vdupq_n_f32(0.0)), vdupq_n_f32(255.0));
    vcvtq_u32_f32(clamped)
}

/// Sepia-tone a span of whole pixels using NEON, 8 pixels per operation.
///
/// # Safety
/// - Caller must ensure this is running on aarch64 with NEON.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn sepia_span_neon(row: &mut [u8]) {
    unsafe {
        let [blue_row, green_row, red_row] = SEPIA_COEFFICIENTS;

        let ptr = row.as_mut_ptr();
        let groups = row.len() / GROUP_BYTES;
        for i in 0..groups {
            let p = ptr.add(i * GROUP_BYTES);
            let bgr = vld3_u8(p);

            let blue_lo = widen_low(bgr.0);
            let blue_hi = widen_high(bgr.0);
            let green_lo = widen_low(bgr.1);
            let green_hi = widen_high(bgr.1);
            let red_lo = widen_low(bgr.2);
            let red_hi = widen_high(bgr.2);

            let mut toned = bgr;
            for (channel, coefficients) in [blue_row, green_row, red_row].into_iter().enumerate() {
                let lo = matrix_row(red_lo, green_lo, blue_lo, coefficients);
                let hi = matrix_row(red_hi, green_hi, blue_hi, coefficients);
                let narrowed = vqmovn_u16(vcombine_u16(vqmovn_u32(lo), vqmovn_u32(hi)));
                match channel {
                    0 => toned.0 = narrowed,
                    1 => toned.1 = narrowed,
                    _ => toned.2 = narrowed,
                }
            }

            vst3_u8(p, toned);
        }

        for position in (groups * GROUP_BYTES..row.len()).step_by(CHANNELS) {
            sepia_pixel(row, position);
        }
    }
}
