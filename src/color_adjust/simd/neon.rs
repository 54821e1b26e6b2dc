//! NEON implementation of the brightness/contrast span on aarch64.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use crate::saturate::saturate;

/// Transform a channel span using NEON, 8 channels per operation.
///
/// The truncating saturating convert (`vcvtq_u32_f32`) maps NaN to 0 and
/// clamps out-of-range values, matching the scalar `clamp`-then-cast after
/// the explicit min/max against `[0, 255]`.
///
/// # Safety
/// - Caller must ensure this is running on aarch64 with NEON.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn brightness_contrast_span_neon(channels: &mut [u8], brightness: f32, contrast: f32) {
    unsafe {
        let offset = vdupq_n_f32(brightness);
        let factor = vdupq_n_f32(contrast);
        let zero = vdupq_n_f32(0.0);
        let max = vdupq_n_f32(255.0);

        let ptr = channels.as_mut_ptr();
        let groups = channels.len() / 8;
        for i in 0..groups {
            let p = ptr.add(i * 8);

            let wide = vmovl_u8(vld1_u8(p));
            let lo = vcvtq_f32_u32(vmovl_u16(vget_low_u16(wide)));
            let hi = vcvtq_f32_u32(vmovl_u16(vget_high_u16(wide)));

            let lo = vaddq_f32(vmulq_f32(lo, factor), offset);
            let hi = vaddq_f32(vmulq_f32(hi, factor), offset);

            let lo = vminq_f32(vmaxq_f32(lo, zero), max);
            let hi = vminq_f32(vmaxq_f32(hi, zero), max);

            let lo = vcvtq_u32_f32(lo);
            let hi = vcvtq_u32_f32(hi);

            let narrowed = vcombine_u16(vqmovn_u32(lo), vqmovn_u32(hi));
            vst1_u8(p, vqmovn_u16(narrowed));
        }

        for channel in &mut channels[groups * 8..] {
            *channel = saturate(*channel as f32 * contrast + brightness);
        }
    }
}
