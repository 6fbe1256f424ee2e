//! Deterministic descending ranking of candidates.

use std::cmp::Ordering;

use crate::candidate::filter::Candidate;

fn candidate_cmp_desc(a: &Candidate, b: &Candidate) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.index.cmp(&b.index))
}

/// Sorts candidates by descending score with equal scores ordered by
/// ascending spatial index.
///
/// The comparator is a total order (`f32::total_cmp`), so the result is
/// reproducible regardless of the input order or the sort's stability.
pub fn sort_candidates_desc(candidates: &mut [Candidate]) {
    candidates.sort_by(candidate_cmp_desc);
}
