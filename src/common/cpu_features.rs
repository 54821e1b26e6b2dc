//! CPU feature detection for runtime SIMD dispatch.
//!
//! Detection runs once per process and is cached. Kernel dispatch and tests
//! query these functions instead of calling `is_x86_feature_detected!`
//! directly, so repeated CPUID probes are avoided.

use std::sync::OnceLock;

/// CPU feature flags detected once at startup.
#[derive(Debug, Clone, Copy)]
pub struct X86Features {
    pub sse4_1: bool,
    pub avx2: bool,
}

static FEATURES: OnceLock<X86Features> = OnceLock::new();

/// Get cached CPU features (detected on first call).
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn get() -> X86Features {
    *FEATURES.get_or_init(|| X86Features {
        sse4_1: is_x86_feature_detected!("sse4.1"),
        avx2: is_x86_feature_detected!("avx2"),
    })
}

/// Get cached CPU features - stub for non-x86 platforms.
#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn get() -> X86Features {
    *FEATURES.get_or_init(|| X86Features {
        sse4_1: false,
        avx2: false,
    })
}

/// Check if SSE4.1 is available.
#[inline]
pub fn has_sse4_1() -> bool {
    get().sse4_1
}

/// Check if AVX2 is available.
#[inline]
pub fn has_avx2() -> bool {
    get().avx2
}

/// Check if NEON is available. NEON is baseline on aarch64.
#[inline]
pub fn has_neon() -> bool {
    cfg!(target_arch = "aarch64")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_implications() {
        let f = get();
        // AVX2 hardware always has the full SSE line.
        if f.avx2 {
            assert!(f.sse4_1, "AVX2 without SSE4.1 should not exist");
        }
    }

    #[test]
    fn test_detection_is_stable() {
        let a = get();
        let b = get();
        assert_eq!(a.sse4_1, b.sse4_1);
        assert_eq!(a.avx2, b.avx2);
    }
}
