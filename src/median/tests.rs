//! Tests for the median kernel.

use super::*;
use rand::Rng;
use rand::seq::SliceRandom;

/// Per-pixel reference pass over a whole image, in the given traversal order.
fn reference_image(
    source: &[u8],
    destination: &mut [u8],
    width: usize,
    height: usize,
    reversed: bool,
) {
    let mut coordinates: Vec<(usize, usize)> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .collect();
    if reversed {
        coordinates.reverse();
    }
    for (x, y) in coordinates {
        median_pixel(
            source,
            destination,
            (y * width + x) * CHANNELS,
            x,
            y,
            width,
            height,
        );
    }
}

#[test]
fn test_force_odd() {
    assert_eq!(force_odd(1), 1);
    assert_eq!(force_odd(2), 3);
    assert_eq!(force_odd(3), 3);
    assert_eq!(force_odd(4), 5);
    assert_eq!(WINDOW_DIM % 2, 1, "window dimension must end up odd");
}

#[test]
fn test_median_of_odd_counts() {
    let mut single = [42];
    assert_eq!(median_of(&mut single), 42);

    let mut three = [30, 10, 20];
    assert_eq!(median_of(&mut three), 20);

    let mut nine = [90, 10, 80, 20, 70, 30, 60, 40, 50];
    assert_eq!(median_of(&mut nine), 50);
}

#[test]
fn test_median_of_even_counts_round_down() {
    // Unreachable through the kernels (windows are forced odd) but the
    // branch must still be correct: integer average of the two middle
    // elements, rounded down.
    let mut two = [10, 20];
    assert_eq!(median_of(&mut two), 15);

    let mut two_odd_sum = [10, 21];
    assert_eq!(median_of(&mut two_odd_sum), 15);

    let mut four = [40, 10, 30, 20];
    assert_eq!(median_of(&mut four), 25);

    // The u16 widening keeps large byte sums from wrapping.
    let mut large = [255, 255];
    assert_eq!(median_of(&mut large), 255);
}

#[test]
fn test_median_of_empty() {
    let mut empty: [u8; 0] = [];
    assert_eq!(median_of(&mut empty), 0);
}

#[test]
fn test_uniform_image_unchanged() {
    let (width, height) = (8, 6);
    let source = vec![77u8; width * height * CHANNELS];
    let mut destination = vec![0u8; source.len()];

    median_image(&source, &mut destination, width, height);

    assert_eq!(destination, source);
}

#[test]
fn test_hot_pixel_removed() {
    let (width, height) = (5, 5);
    let mut source = vec![10u8; width * height * CHANNELS];
    // Hot pixel in the center of every channel.
    let center = (2 * width + 2) * CHANNELS;
    source[center] = 255;
    source[center + 1] = 255;
    source[center + 2] = 255;

    let mut destination = vec![0u8; source.len()];
    median_image(&source, &mut destination, width, height);

    assert_eq!(&destination[center..center + CHANNELS], &[10, 10, 10]);
}

#[test]
fn test_center_of_distinct_window() {
    // 3x3 image, channel 0 holds 1..=9; the center's window is the whole
    // image, so its output is the middle of the sorted sequence.
    let (width, height) = (3, 3);
    let mut source = vec![0u8; width * height * CHANNELS];
    for (pixel, value) in (1..=9u8).enumerate() {
        source[pixel * CHANNELS] = value;
    }

    let mut destination = vec![0u8; source.len()];
    median_pixel(&source, &mut destination, (width + 1) * CHANNELS, 1, 1, width, height);

    assert_eq!(destination[(width + 1) * CHANNELS], 5);
}

#[test]
fn test_corner_window_uses_clamped_samples() {
    // Channel 0 of a 3x3 image:
    //   1 2 3
    //   4 5 6
    //   7 8 9
    // The window at (0, 0) clamps to {1 x4, 2 x2, 4 x2, 5}; median = 2.
    let (width, height) = (3, 3);
    let mut source = vec![0u8; width * height * CHANNELS];
    for (pixel, value) in (1..=9u8).enumerate() {
        source[pixel * CHANNELS] = value;
    }

    let mut destination = vec![0u8; source.len()];
    median_pixel(&source, &mut destination, 0, 0, 0, width, height);

    assert_eq!(destination[0], 2);
}

#[test]
fn test_single_pixel_image() {
    let source = vec![13, 57, 201];
    let mut destination = vec![0u8; 3];
    median_image(&source, &mut destination, 1, 1);
    assert_eq!(destination, source);
}

#[test]
fn test_every_window_permutation_of_distinct_values() {
    // For a 3x3 image the center window is the full value set; the output
    // must be the sorted middle for every ordering. Shuffles sample the
    // orderings densely, the exhaustive network test covers the rest.
    let values: [u8; 9] = [5, 30, 55, 80, 105, 130, 155, 180, 205];
    let mut rng = rand::rng();

    let mut layout = values;
    for _ in 0..2_000 {
        layout.shuffle(&mut rng);

        let mut source = vec![0u8; 9 * CHANNELS];
        for (pixel, value) in layout.iter().enumerate() {
            source[pixel * CHANNELS] = *value;
        }

        let mut destination = vec![0u8; source.len()];
        median_pixel(&source, &mut destination, (3 + 1) * CHANNELS, 1, 1, 3, 3);

        assert_eq!(
            destination[(3 + 1) * CHANNELS],
            105,
            "median of {layout:?} should be the sorted middle"
        );
    }
}

#[test]
fn test_channels_filter_independently() {
    let (width, height) = (3, 1);
    // Channel 0 ascending, channel 2 descending, channel 1 constant.
    let source = vec![10, 7, 90, 20, 7, 80, 30, 7, 70];
    let mut destination = vec![0u8; source.len()];

    median_image(&source, &mut destination, width, height);

    // Middle pixel: each channel's window is its own value set.
    assert_eq!(&destination[CHANNELS..2 * CHANNELS], &[20, 7, 80]);
}

#[test]
fn test_image_matches_reference_any_traversal_order() {
    let mut rng = rand::rng();
    // Wide enough to engage the wide backends, with edge rows and columns.
    let (width, height) = (40, 9);
    let source: Vec<u8> = (0..width * height * CHANNELS)
        .map(|_| rng.random())
        .collect();

    let mut parallel = vec![0u8; source.len()];
    let mut forward = vec![0u8; source.len()];
    let mut backward = vec![0u8; source.len()];

    median_image(&source, &mut parallel, width, height);
    reference_image(&source, &mut forward, width, height, false);
    reference_image(&source, &mut backward, width, height, true);

    assert_eq!(forward, backward, "output must not depend on traversal order");
    assert_eq!(parallel, forward, "parallel pass must match the reference");
}

#[test]
fn test_chunk_boundary_heights() {
    // Heights around parallel chunk boundaries must leave no seam.
    let mut rng = rand::rng();
    for height in [2, 3, 7, 9, 15, 17] {
        let width = 10;
        let source: Vec<u8> = (0..width * height * CHANNELS)
            .map(|_| rng.random_range(0..8) * 32)
            .collect();

        let mut parallel = vec![0u8; source.len()];
        let mut reference = vec![0u8; source.len()];

        median_image(&source, &mut parallel, width, height);
        reference_image(&source, &mut reference, width, height, false);

        assert_eq!(parallel, reference, "mismatch at height {height}");
    }
}

#[test]
fn test_empty_image() {
    let source: Vec<u8> = vec![];
    let mut destination: Vec<u8> = vec![];
    median_image(&source, &mut destination, 0, 0);
    assert!(destination.is_empty());
}

#[test]
#[should_panic(expected = "source length must equal width * height * 3")]
fn test_wrong_source_length_panics() {
    let source = vec![0u8; 10];
    let mut destination = vec![0u8; 12];
    median_image(&source, &mut destination, 2, 2);
}

#[test]
#[should_panic(expected = "destination length must equal source length")]
fn test_wrong_destination_length_panics() {
    let source = vec![0u8; 12];
    let mut destination = vec![0u8; 10];
    median_image(&source, &mut destination, 2, 2);
}
