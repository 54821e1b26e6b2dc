//! SSE4.1 and AVX2 implementations of the brightness/contrast span.
//!
//! Channel bytes are widened to f32 lanes (4 per SSE group, 8 per AVX2
//! group), transformed with separate multiply and add, clamped with the
//! value as the first min/max operand (so NaN collapses to the lower bound,
//! matching scalar `clamp`-then-cast), truncated, and narrowed back through
//! the saturating pack instructions.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::saturate::saturate;

/// Transform a channel span using SSE4.1, 4 channels per operation.
///
/// # Safety
/// - Caller must ensure SSE4.1 is available.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.1")]
pub unsafe fn brightness_contrast_span_sse41(channels: &mut [u8], brightness: f32, contrast: f32) {
    let offset = _mm_set1_ps(brightness);
    let factor = _mm_set1_ps(contrast);
    let zero = _mm_setzero_ps();
    let max = _mm_set1_ps(255.0);

    let groups = channels.len() / 4;
    for i in 0..groups {
        let group = &mut channels[i * 4..i * 4 + 4];
        let mut quad = [0u8; 4];
        quad.copy_from_slice(group);

        let v = _mm_cvtepu8_epi32(_mm_cvtsi32_si128(i32::from_le_bytes(quad)));
        let v = _mm_cvtepi32_ps(v);
        let v = _mm_add_ps(_mm_mul_ps(v, factor), offset);
        let v = _mm_min_ps(_mm_max_ps(v, zero), max);
        let v = _mm_cvttps_epi32(v);
        let packed = _mm_packus_epi16(_mm_packus_epi32(v, v), _mm_setzero_si128());

        group.copy_from_slice(&(_mm_cvtsi128_si32(packed) as u32).to_le_bytes());
    }

    for channel in &mut channels[groups * 4..] {
        *channel = saturate(*channel as f32 * contrast + brightness);
    }
}

/// Transform a channel span using AVX2, 8 channels per operation.
///
/// # Safety
/// - Caller must ensure AVX2 is available.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn brightness_contrast_span_avx2(channels: &mut [u8], brightness: f32, contrast: f32) {
    let offset = _mm256_set1_ps(brightness);
    let factor = _mm256_set1_ps(contrast);
    let zero = _mm256_setzero_ps();
    let max = _mm256_set1_ps(255.0);

    let groups = channels.len() / 8;
    for i in 0..groups {
        let group = &mut channels[i * 8..i * 8 + 8];
        let mut octet = [0u8; 8];
        octet.copy_from_slice(group);

        let v = _mm256_cvtepu8_epi32(_mm_cvtsi64_si128(i64::from_le_bytes(octet)));
        let v = _mm256_cvtepi32_ps(v);
        let v = _mm256_add_ps(_mm256_mul_ps(v, factor), offset);
        let v = _mm256_min_ps(_mm256_max_ps(v, zero), max);
        let v = _mm256_cvttps_epi32(v);

        let lo = _mm256_castsi256_si128(v);
        let hi = _mm256_extracti128_si256::<1>(v);
        let packed = _mm_packus_epi16(_mm_packus_epi32(lo, hi), _mm_setzero_si128());

        group.copy_from_slice(&(_mm_cvtsi128_si64(packed) as u64).to_le_bytes());
    }

    for channel in &mut channels[groups * 8..] {
        *channel = saturate(*channel as f32 * contrast + brightness);
    }
}
