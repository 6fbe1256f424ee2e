#![cfg(feature = "rayon")]

//! The parallel driver must reproduce the sequential output byte for byte:
//! (batch, class) passes are independent and the collect preserves pass
//! order.

use boxnms::{non_max_suppression, BoxFormat, BoxesView, NmsConfig, ScoresView};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn parallel_matches_sequential() {
    let num_batches = 3;
    let num_classes = 4;
    let spatial = 160;

    let mut rng = StdRng::seed_from_u64(42);
    let mut boxes_data = Vec::with_capacity(num_batches * spatial * 4);
    for _ in 0..num_batches * spatial {
        let y1: f32 = rng.random_range(0.0..100.0);
        let x1: f32 = rng.random_range(0.0..100.0);
        let h: f32 = rng.random_range(4.0..25.0);
        let w: f32 = rng.random_range(4.0..25.0);
        boxes_data.extend_from_slice(&[y1, x1, y1 + h, x1 + w]);
    }
    let scores_data: Vec<f32> = (0..num_batches * num_classes * spatial)
        .map(|_| rng.random_range(0.0..1.0))
        .collect();

    let boxes = BoxesView::new(&boxes_data, num_batches, spatial).unwrap();
    let scores = ScoresView::new(&scores_data, num_batches, num_classes, spatial).unwrap();

    let base = NmsConfig {
        max_output_boxes_per_class: 20,
        iou_threshold: 0.5,
        score_threshold: 0.4,
        box_format: BoxFormat::Corner,
        parallel: false,
    };
    let par = NmsConfig {
        parallel: true,
        ..base
    };

    let sequential = non_max_suppression(&boxes, &scores, &base).unwrap();
    let parallel = non_max_suppression(&boxes, &scores, &par).unwrap();
    assert_eq!(sequential, parallel);
}
