#![cfg(feature = "simd")]

//! The SIMD score filter must emit exactly the scalar candidate sequence,
//! including NaN handling, exact-threshold values, and tails shorter than a
//! lane group.

use boxnms::{filter_candidates, filter_candidates_simd};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn simd_filter_matches_scalar_across_lengths() {
    let mut rng = StdRng::seed_from_u64(99);
    for len in [0usize, 1, 7, 8, 9, 31, 64, 100, 257] {
        let scores: Vec<f32> = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
        for threshold in [-0.5f32, 0.0, 0.25, 1.5] {
            assert_eq!(
                filter_candidates_simd(&scores, threshold),
                filter_candidates(&scores, threshold),
                "len {len}, threshold {threshold}"
            );
        }
    }
}

#[test]
fn simd_filter_matches_scalar_on_nan_and_exact_threshold() {
    let mut scores: Vec<f32> = (0..48).map(|i| (i as f32) / 48.0).collect();
    scores[0] = f32::NAN;
    scores[9] = f32::NAN;
    scores[17] = 0.5;
    scores[33] = 0.5;
    scores[40] = f32::NEG_INFINITY;
    scores[41] = f32::INFINITY;

    assert_eq!(
        filter_candidates_simd(&scores, 0.5),
        filter_candidates(&scores, 0.5)
    );
}
