//! SIMD score filtering using the `wide` crate.
//!
//! Eight scores are classified per step with `f32x8`; set lanes are expanded
//! back into the same ascending-index candidate list the scalar path
//! produces. The tail after the last full lane group falls back to the
//! scalar comparison. NaN lanes fail `cmp_ge` exactly like the scalar `>=`.

use wide::f32x8;

use crate::candidate::filter::Candidate;

const LANES: usize = 8;

/// Load 8 f32 values into f32x8.
#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

/// Collects `(score, index)` pairs with `score >= threshold`, 8 lanes at a
/// time. Produces the identical candidate sequence to
/// [`filter_candidates`](crate::candidate::filter::filter_candidates).
pub fn filter_candidates_simd(scores: &[f32], threshold: f32) -> Vec<Candidate> {
    let mut out = Vec::new();
    let thresh = f32x8::splat(threshold);
    let simd_end = scores.len() / LANES * LANES;

    let mut i = 0;
    while i < simd_end {
        let vals = load_f32x8(&scores[i..]);
        let mask = vals.cmp_ge(thresh).to_array();
        for (lane, flag) in mask.iter().enumerate() {
            // Set lanes carry an all-ones bit pattern; test the bits, not
            // the float value.
            if flag.to_bits() != 0 {
                let index = i + lane;
                out.push(Candidate {
                    score: scores[index],
                    index,
                });
            }
        }
        i += LANES;
    }

    while i < scores.len() {
        let score = scores[i];
        if score >= threshold {
            out.push(Candidate { score, index: i });
        }
        i += 1;
    }

    out
}
