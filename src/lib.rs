//! Lustra - Pixel-transform kernels for packed BGR byte buffers.
//!
//! This library applies per-pixel and per-neighborhood color transforms to
//! tightly packed 3-channel images (blue-green-red byte triplets):
//! - Linear brightness/contrast adjustment
//! - Fixed-matrix sepia toning
//! - Spatial median filtering (salt-and-pepper noise reduction)
//!
//! Every kernel has a portable scalar implementation and one or more wide
//! SIMD implementations (SSE4.1/AVX2 on x86_64, NEON on aarch64). All
//! backends for a kernel produce byte-identical output; the backend is
//! selected once per process from detected CPU features and can be pinned
//! with the `LUSTRA_BACKEND` environment variable.
//!
//! # Quick Start
//!
//! ```rust
//! use lustra::{brightness_contrast_image, median_image, sepia_image};
//!
//! let (width, height) = (4, 4);
//! let mut pixels = vec![128u8; width * height * lustra::CHANNELS];
//!
//! brightness_contrast_image(&mut pixels, width, height, 10.0, 1.2);
//! sepia_image(&mut pixels, width, height);
//!
//! let source = pixels.clone();
//! median_image(&source, &mut pixels, width, height);
//! ```
//!
//! Buffers are owned entirely by the caller; kernels only read and write in
//! place (the median filter writes a separate destination buffer).

mod backend;
mod color_adjust;
pub(crate) mod common;
mod median;
mod sampling;
mod saturate;
mod sepia;

/// Number of color channels per pixel (blue, green, red).
pub const CHANNELS: usize = 3;

// ============================================================================
// Backend selection
// ============================================================================

pub use backend::{Backend, active_backend};

// ============================================================================
// Leaf utilities
// ============================================================================

pub use sampling::sample_pixel;
pub use saturate::saturate;

// ============================================================================
// Kernels
// ============================================================================

pub use color_adjust::{
    brightness_contrast_image, brightness_contrast_pixel, brightness_contrast_row,
};
pub use median::{MEDIAN_WINDOW_SIZE, median_image, median_pixel};
pub use sepia::{sepia_image, sepia_pixel, sepia_row};
