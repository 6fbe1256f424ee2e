//! Greedy suppression over one ranked candidate list.
//!
//! The pass walks the ranking once: the best unsuppressed candidate is
//! accepted, every later unsuppressed candidate overlapping it beyond the
//! IoU threshold is marked, and the walk resumes at the next unsuppressed
//! position. Acceptance stops the moment the per-class output cap is
//! reached. The marks live only for the duration of the pass.

use crate::candidate::filter::Candidate;
use crate::geometry::{disjoint, iou_corner, BoxFormat, CornerBox};

/// Runs the suppression loop for one (batch, class) pass.
///
/// `batch_boxes` is the `[spatial, 4]` slice for the pass's batch and
/// `ranked` must already be in descending-score order. Returns the accepted
/// spatial indices in acceptance order.
pub(crate) fn suppress_pass(
    batch_boxes: &[f32],
    ranked: &[Candidate],
    format: BoxFormat,
    iou_threshold: f32,
    max_outputs: usize,
) -> Vec<usize> {
    if max_outputs == 0 || ranked.is_empty() {
        return Vec::new();
    }

    // Decode every candidate's box once; the loop below revisits pairs.
    let corners: Vec<CornerBox> = ranked
        .iter()
        .map(|candidate| {
            let at = candidate.index * 4;
            CornerBox::from_raw(
                [
                    batch_boxes[at],
                    batch_boxes[at + 1],
                    batch_boxes[at + 2],
                    batch_boxes[at + 3],
                ],
                format,
            )
        })
        .collect();

    // Disjoint pairs have IoU exactly 0, so the rectangle pre-test may only
    // stand in for the comparison when 0 cannot exceed the threshold.
    let skip_disjoint = iou_threshold >= 0.0;

    let mut suppressed = vec![false; ranked.len()];
    let mut selected = Vec::new();

    for i in 0..ranked.len() {
        if suppressed[i] {
            continue;
        }
        selected.push(ranked[i].index);
        if selected.len() == max_outputs {
            break;
        }
        for j in (i + 1)..ranked.len() {
            if suppressed[j] {
                continue;
            }
            if skip_disjoint && disjoint(&corners[i], &corners[j]) {
                continue;
            }
            if iou_corner(&corners[i], &corners[j]) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    selected
}
