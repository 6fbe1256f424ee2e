use boxnms::io::{read_f32_tensor, write_selected_indices_file};
use boxnms::{non_max_suppression, BoxFormat, BoxesView, NmsConfig, ScoresView, SelectedIndex};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Batched NMS CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BoxFormatConfig {
    Corner,
    Center,
}

impl From<BoxFormatConfig> for BoxFormat {
    fn from(value: BoxFormatConfig) -> Self {
        match value {
            BoxFormatConfig::Corner => BoxFormat::Corner,
            BoxFormatConfig::Center => BoxFormat::Center,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    boxes_path: String,
    scores_path: String,
    num_batches: usize,
    num_classes: usize,
    spatial_dimension: usize,
    max_output_boxes_per_class: usize,
    iou_threshold: f32,
    score_threshold: f32,
    box_format: BoxFormatConfig,
    parallel: bool,
    output_path: Option<String>,
    binary_output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = NmsConfig::default();
        Self {
            boxes_path: String::new(),
            scores_path: String::new(),
            num_batches: 1,
            num_classes: 1,
            spatial_dimension: 0,
            max_output_boxes_per_class: cfg.max_output_boxes_per_class,
            iou_threshold: cfg.iou_threshold,
            score_threshold: cfg.score_threshold,
            box_format: BoxFormatConfig::Corner,
            parallel: cfg.parallel,
            output_path: None,
            binary_output_path: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct SelectedRecord {
    batch: i64,
    class: i64,
    box_index: i64,
}

impl From<SelectedIndex> for SelectedRecord {
    fn from(value: SelectedIndex) -> Self {
        Self {
            batch: value.batch,
            class: value.class,
            box_index: value.box_index,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    count: usize,
    selected: Vec<SelectedRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("boxnms=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.boxes_path.is_empty() || config.scores_path.is_empty() {
        return Err("boxes_path and scores_path must be set in the config".into());
    }

    let boxes_data = read_f32_tensor(&config.boxes_path)?;
    let expected_boxes = config.num_batches * config.spatial_dimension * 4;
    if boxes_data.len() != expected_boxes {
        return Err(format!(
            "boxes file holds {} values, declared shape needs {expected_boxes}",
            boxes_data.len()
        )
        .into());
    }

    let scores_data = read_f32_tensor(&config.scores_path)?;
    let expected_scores = config.num_batches * config.num_classes * config.spatial_dimension;
    if scores_data.len() != expected_scores {
        return Err(format!(
            "scores file holds {} values, declared shape needs {expected_scores}",
            scores_data.len()
        )
        .into());
    }

    let boxes = BoxesView::new(&boxes_data, config.num_batches, config.spatial_dimension)?;
    let scores = ScoresView::new(
        &scores_data,
        config.num_batches,
        config.num_classes,
        config.spatial_dimension,
    )?;

    let selected = non_max_suppression(
        &boxes,
        &scores,
        &NmsConfig {
            max_output_boxes_per_class: config.max_output_boxes_per_class,
            iou_threshold: config.iou_threshold,
            score_threshold: config.score_threshold,
            box_format: config.box_format.into(),
            parallel: config.parallel,
        },
    )?;

    if let Some(path) = &config.binary_output_path {
        write_selected_indices_file(path, &selected)?;
    }

    let output = Output {
        count: selected.len(),
        selected: selected.into_iter().map(SelectedRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
