//! Process-wide compute backend selection.
//!
//! Each kernel has a portable scalar implementation and one or more wide
//! SIMD implementations. The backend is selected once per process: the
//! `LUSTRA_BACKEND` environment variable (`scalar`, `sse41`, `avx2`, `neon`)
//! pins a specific backend, otherwise the best supported feature set wins.
//! Selection is never a per-call parameter; every kernel invocation in a
//! process observes the same backend.

use std::sync::OnceLock;

use crate::common::cpu_features;

/// Environment variable that pins the compute backend for the process.
pub const BACKEND_ENV_VAR: &str = "LUSTRA_BACKEND";

/// An interchangeable kernel implementation strategy.
///
/// All backends of a kernel produce byte-identical output; they differ only
/// in how many pixels or channels one operation processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Portable per-pixel implementation; always available.
    Scalar,
    /// 128-bit wide batches on x86_64.
    Sse41,
    /// 256-bit wide batches on x86_64.
    Avx2,
    /// 128-bit wide batches on aarch64.
    Neon,
}

impl Backend {
    /// Human-readable backend name, matching the `LUSTRA_BACKEND` spelling.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Sse41 => "sse41",
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
        }
    }

    /// Whether this backend can run on the current CPU.
    pub fn is_supported(self) -> bool {
        match self {
            Backend::Scalar => true,
            Backend::Sse41 => cpu_features::has_sse4_1(),
            Backend::Avx2 => cpu_features::has_avx2(),
            Backend::Neon => cpu_features::has_neon(),
        }
    }
}

static ACTIVE: OnceLock<Backend> = OnceLock::new();

/// The backend used by all kernels in this process.
///
/// Resolved on first call and cached: an explicit `LUSTRA_BACKEND` override
/// wins if the named backend is supported, otherwise the best detected
/// feature set is used, falling back to the portable scalar path.
#[inline]
pub fn active_backend() -> Backend {
    *ACTIVE.get_or_init(|| {
        let backend = from_env().unwrap_or_else(detect);
        log::debug!("compute backend: {}", backend.name());
        backend
    })
}

/// Parse a `LUSTRA_BACKEND` value. Unknown names return `None`.
fn parse(name: &str) -> Option<Backend> {
    match name.trim().to_ascii_lowercase().as_str() {
        "scalar" => Some(Backend::Scalar),
        "sse41" | "sse4.1" => Some(Backend::Sse41),
        "avx2" => Some(Backend::Avx2),
        "neon" => Some(Backend::Neon),
        _ => None,
    }
}

fn from_env() -> Option<Backend> {
    let raw = std::env::var(BACKEND_ENV_VAR).ok()?;
    let Some(requested) = parse(&raw) else {
        log::warn!("{BACKEND_ENV_VAR}={raw:?} is not a known backend, auto-detecting");
        return None;
    };
    if !requested.is_supported() {
        log::warn!(
            "{BACKEND_ENV_VAR}={} is not supported on this CPU, auto-detecting",
            requested.name()
        );
        return None;
    }
    Some(requested)
}

/// Pick the widest supported backend, scalar when nothing else applies.
fn detect() -> Backend {
    if cpu_features::has_avx2() {
        Backend::Avx2
    } else if cpu_features::has_sse4_1() {
        Backend::Sse41
    } else if cpu_features::has_neon() {
        Backend::Neon
    } else {
        Backend::Scalar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_backend_is_supported() {
        assert!(active_backend().is_supported());
    }

    #[test]
    fn test_active_backend_is_stable() {
        assert_eq!(active_backend(), active_backend());
    }

    #[test]
    fn test_parse_known_names() {
        assert_eq!(parse("scalar"), Some(Backend::Scalar));
        assert_eq!(parse("sse41"), Some(Backend::Sse41));
        assert_eq!(parse("sse4.1"), Some(Backend::Sse41));
        assert_eq!(parse("AVX2"), Some(Backend::Avx2));
        assert_eq!(parse(" neon "), Some(Backend::Neon));
        assert_eq!(parse("avx512"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_detect_is_supported() {
        assert!(detect().is_supported());
    }

    #[test]
    fn test_name_round_trips() {
        for backend in [Backend::Scalar, Backend::Sse41, Backend::Avx2, Backend::Neon] {
            assert_eq!(parse(backend.name()), Some(backend));
        }
    }
}
