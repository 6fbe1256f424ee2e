//! Batched non-maximum suppression for object-detection post-processing.
//!
//! This crate implements the ONNX `NonMaxSuppression` contract: a dense
//! `[batch, class, spatial]` score grid plus a `[batch, spatial, 4]` box
//! grid are reduced to a sparse, deterministically ordered list of
//! `(batch, class, box)` index triples. The scalar pipeline is the
//! reference; optional SIMD score filtering (`simd` feature) and
//! rayon-parallel batch/class passes (`rayon` feature) reproduce its output
//! bit for bit.

pub mod batch;
mod candidate;
pub mod geometry;
pub mod io;
mod suppress;
pub mod tensor;
mod trace;
pub mod util;

pub use batch::{non_max_suppression, NmsConfig, SelectedIndex};
pub use candidate::filter::{filter_candidates, Candidate};
pub use candidate::rank::sort_candidates_desc;
pub use geometry::{convert_format, iou, BoxFormat};
pub use tensor::{BoxesView, ScoresView};
pub use util::{NmsError, NmsResult};

#[cfg(feature = "simd")]
pub use candidate::simd::filter_candidates_simd;
