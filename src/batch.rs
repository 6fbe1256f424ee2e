//! Batched NMS driver.
//!
//! Iterates (batch, class) pairs batch-major, runs the
//! filter → rank → suppress pipeline for each pair, and concatenates the
//! accepted triples in iteration order. With the `rayon` feature and
//! [`NmsConfig::parallel`], the independent pairs run on the thread pool;
//! the ordered collect keeps the output identical to the sequential path.

use crate::candidate::rank::sort_candidates_desc;
use crate::geometry::BoxFormat;
use crate::suppress::suppress_pass;
use crate::tensor::{BoxesView, ScoresView};
use crate::trace::{trace_event, trace_span};
use crate::util::{NmsError, NmsResult};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

// Score filtering backend - use SIMD when available.
#[cfg(not(feature = "simd"))]
use crate::candidate::filter::filter_candidates as filter_pass;
#[cfg(feature = "simd")]
use crate::candidate::simd::filter_candidates_simd as filter_pass;

/// Parameters for one batched NMS invocation.
#[derive(Clone, Copy, Debug)]
pub struct NmsConfig {
    /// Output cap per (batch, class) pair; 0 yields an empty result.
    pub max_output_boxes_per_class: usize,
    /// Overlap above this suppresses the lower-scoring candidate.
    pub iou_threshold: f32,
    /// Minimum score for a box to become a candidate.
    pub score_threshold: f32,
    /// Encoding of the box tensor.
    pub box_format: BoxFormat,
    /// Run independent (batch, class) passes on the rayon pool.
    /// Ignored unless the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for NmsConfig {
    fn default() -> Self {
        Self {
            max_output_boxes_per_class: 50,
            iou_threshold: 0.5,
            score_threshold: 0.1,
            box_format: BoxFormat::Corner,
            parallel: false,
        }
    }
}

/// Accepted detection, addressed by tensor indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectedIndex {
    /// Batch the detection belongs to.
    pub batch: i64,
    /// Class the detection was scored under.
    pub class: i64,
    /// Spatial index of the box within the batch.
    pub box_index: i64,
}

/// Runs batched non-maximum suppression over the box and score tensors.
///
/// Output triples are grouped batch-major then class-major, and within a
/// group ordered by descending score (ties by ascending box index). Repeated
/// invocations over identical inputs produce identical sequences.
pub fn non_max_suppression(
    boxes: &BoxesView<'_>,
    scores: &ScoresView<'_>,
    cfg: &NmsConfig,
) -> NmsResult<Vec<SelectedIndex>> {
    if boxes.num_batches() != scores.num_batches() {
        return Err(NmsError::ShapeMismatch {
            context: "num_batches",
            expected: boxes.num_batches(),
            got: scores.num_batches(),
        });
    }
    if boxes.spatial() != scores.spatial() {
        return Err(NmsError::ShapeMismatch {
            context: "spatial_dimension",
            expected: boxes.spatial(),
            got: scores.spatial(),
        });
    }

    let _span = trace_span!(
        "non_max_suppression",
        batches = scores.num_batches(),
        classes = scores.num_classes()
    )
    .entered();

    // A zero cap empties every pass; skip filtering and ranking entirely.
    if cfg.max_output_boxes_per_class == 0 {
        return Ok(Vec::new());
    }

    let mut passes = Vec::with_capacity(scores.num_batches() * scores.num_classes());
    for batch in 0..scores.num_batches() {
        for class in 0..scores.num_classes() {
            passes.push((batch, class));
        }
    }

    #[cfg(feature = "rayon")]
    let per_pass: Vec<Vec<SelectedIndex>> = if cfg.parallel {
        passes
            .par_iter()
            .map(|&(batch, class)| run_pass(boxes, scores, cfg, batch, class))
            .collect()
    } else {
        passes
            .iter()
            .map(|&(batch, class)| run_pass(boxes, scores, cfg, batch, class))
            .collect()
    };

    #[cfg(not(feature = "rayon"))]
    let per_pass: Vec<Vec<SelectedIndex>> = passes
        .iter()
        .map(|&(batch, class)| run_pass(boxes, scores, cfg, batch, class))
        .collect();

    let selected: Vec<SelectedIndex> = per_pass.into_iter().flatten().collect();
    trace_event!("nms_selected", count = selected.len());
    Ok(selected)
}

/// Filter → rank → suppress for one (batch, class) pair.
fn run_pass(
    boxes: &BoxesView<'_>,
    scores: &ScoresView<'_>,
    cfg: &NmsConfig,
    batch: usize,
    class: usize,
) -> Vec<SelectedIndex> {
    let class_scores = scores
        .class_scores(batch, class)
        .expect("pass indices within bounds");
    let mut candidates = filter_pass(class_scores, cfg.score_threshold);
    if candidates.is_empty() {
        return Vec::new();
    }
    sort_candidates_desc(&mut candidates);

    let batch_boxes = boxes.batch(batch).expect("pass indices within bounds");
    suppress_pass(
        batch_boxes,
        &candidates,
        cfg.box_format,
        cfg.iou_threshold,
        cfg.max_output_boxes_per_class,
    )
    .into_iter()
    .map(|box_index| SelectedIndex {
        batch: batch as i64,
        class: class as i64,
        box_index: box_index as i64,
    })
    .collect()
}
