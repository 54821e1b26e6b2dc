//! SIMD-accelerated brightness/contrast spans.
//!
//! The transform is channel-uniform, so wide implementations simply stream
//! the byte span: widen a group of channels to f32 lanes, multiply-add,
//! clamp, truncate, narrow back to bytes. The multiply and add stay separate
//! operations (no FMA) so every lane is bit-identical to the scalar formula.

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::backend::{self, Backend};
use crate::saturate::saturate;

#[cfg(target_arch = "aarch64")]
pub mod neon;
#[cfg(target_arch = "x86_64")]
pub mod sse;

/// Apply `saturate(c * contrast + brightness)` to every byte of the span,
/// dispatching to the selected backend.
#[inline]
pub fn brightness_contrast_span(channels: &mut [u8], brightness: f32, contrast: f32) {
    #[cfg(target_arch = "x86_64")]
    {
        match backend::active_backend() {
            Backend::Avx2 => {
                unsafe { sse::brightness_contrast_span_avx2(channels, brightness, contrast) };
                return;
            }
            Backend::Sse41 => {
                unsafe { sse::brightness_contrast_span_sse41(channels, brightness, contrast) };
                return;
            }
            _ => {}
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if backend::active_backend() == Backend::Neon {
            unsafe { neon::brightness_contrast_span_neon(channels, brightness, contrast) };
            return;
        }
    }

    brightness_contrast_span_scalar(channels, brightness, contrast);
}

/// Scalar reference implementation of the span transform.
#[inline]
pub fn brightness_contrast_span_scalar(channels: &mut [u8], brightness: f32, contrast: f32) {
    for channel in channels {
        *channel = saturate(*channel as f32 * contrast + brightness);
    }
}
