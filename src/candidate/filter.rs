//! Score thresholding into per-pass candidate lists.

/// Candidate surviving the score threshold for one (batch, class) pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Score at `index` in the class slice.
    pub score: f32,
    /// Spatial index into the batch's box grid.
    pub index: usize,
}

/// Collects `(score, index)` pairs with `score >= threshold`.
///
/// Scalar reference path. Candidates come out in ascending index order; the
/// ranking stage establishes the order that matters. NaN scores never
/// satisfy the comparison and are dropped.
pub fn filter_candidates(scores: &[f32], threshold: f32) -> Vec<Candidate> {
    let mut out = Vec::new();
    for (index, &score) in scores.iter().enumerate() {
        if score >= threshold {
            out.push(Candidate { score, index });
        }
    }
    out
}
