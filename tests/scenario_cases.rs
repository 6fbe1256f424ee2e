//! Integration tests driving the full pipeline over hand-built cases.
//!
//! Cases live in `tests/data/nms_cases.json`: each entry declares the input
//! tensors, the four suppression parameters, and the exact expected triple
//! sequence.

use boxnms::{non_max_suppression, BoxFormat, BoxesView, NmsConfig, ScoresView};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BoxFormatCase {
    Corner,
    Center,
}

impl From<&BoxFormatCase> for BoxFormat {
    fn from(value: &BoxFormatCase) -> Self {
        match value {
            BoxFormatCase::Corner => BoxFormat::Corner,
            BoxFormatCase::Center => BoxFormat::Center,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Case {
    case_id: String,
    num_batches: usize,
    num_classes: usize,
    spatial_dimension: usize,
    boxes: Vec<f32>,
    scores: Vec<f32>,
    max_output_boxes_per_class: usize,
    iou_threshold: f32,
    score_threshold: f32,
    box_format: BoxFormatCase,
    expected: Vec<[i64; 3]>,
}

#[derive(Debug, Deserialize)]
struct CaseFile {
    cases: Vec<Case>,
}

fn load_cases() -> CaseFile {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/nms_cases.json");
    let text = fs::read_to_string(&path).expect("case file readable");
    serde_json::from_str(&text).expect("case file parses")
}

#[test]
fn json_cases_produce_expected_triples() {
    let file = load_cases();
    assert!(!file.cases.is_empty());

    for case in &file.cases {
        let boxes = BoxesView::new(&case.boxes, case.num_batches, case.spatial_dimension)
            .unwrap_or_else(|err| panic!("{}: bad boxes: {err}", case.case_id));
        let scores = ScoresView::new(
            &case.scores,
            case.num_batches,
            case.num_classes,
            case.spatial_dimension,
        )
        .unwrap_or_else(|err| panic!("{}: bad scores: {err}", case.case_id));

        let cfg = NmsConfig {
            max_output_boxes_per_class: case.max_output_boxes_per_class,
            iou_threshold: case.iou_threshold,
            score_threshold: case.score_threshold,
            box_format: (&case.box_format).into(),
            parallel: false,
        };

        let selected = non_max_suppression(&boxes, &scores, &cfg)
            .unwrap_or_else(|err| panic!("{}: run failed: {err}", case.case_id));
        let triples: Vec<[i64; 3]> = selected
            .iter()
            .map(|s| [s.batch, s.class, s.box_index])
            .collect();
        assert_eq!(
            triples, case.expected,
            "case {} produced unexpected triples",
            case.case_id
        );
    }
}
