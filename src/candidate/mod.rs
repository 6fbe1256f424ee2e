//! Candidate production and ranking for one (batch, class) pass.
//!
//! Includes score thresholding and the deterministic descending sort.

pub(crate) mod filter;
pub(crate) mod rank;

#[cfg(feature = "simd")]
pub(crate) mod simd;
