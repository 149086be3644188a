//! Causaprep: Causal Dataset Preparation CLI Tool
//!
//! A command-line tool for turning raw survey data into
//! causal-inference-ready train/validation/test partitions.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use polars::prelude::*;

use cli::{load_config, Cli};
use pipeline::{
    create_treatment, encode, estimated_memory_mb, load_dataset, save_dataset, select_features,
    split, ScreeningOptions, SplitOptions,
};
use report::{export_prep_report, ExportParams, PrepSummary};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve the run configuration; CLI flags override file values
    let mut config = load_config(&cli.config)?;
    if let Some(input) = &cli.input {
        config.datasets.raw = input.clone();
    }
    if let Some(seed) = cli.seed {
        config.split.seed = seed;
    }
    let columns = config.features.clone();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    print_config(
        &config.datasets.raw,
        &cli.config,
        &config.datasets.processed.train,
        config.split.seed,
        config.split.train_fraction,
    );

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading raw dataset...");
    let df = load_dataset(&config.datasets.raw, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols) = df.shape();
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", estimated_memory_mb(&df));
    println!("{}", df.head(Some(5)));

    let mut summary = PrepSummary::new(rows, cols);
    print_step_time(step_start.elapsed());

    // Step 2: Feature screening
    print_step_header(2, "Feature Screening");

    let step_start = Instant::now();
    print_info(&format!(
        "{} fields will be taken from the raw data",
        columns.required_columns().len()
    ));
    let mut df = select_features(&df, &columns)?;
    print_success("Eligibility filter applied");
    print_count("eligible row(s)", df.height(), None);
    summary.set_eligible_rows(df.height());
    print_step_time(step_start.elapsed());

    // Step 3: Treatment variable and cost target
    print_step_header(3, "Treatment and Cost Target");

    let step_start = Instant::now();
    let (treatment, median_hrs) = create_treatment(df.column(&columns.hour_col)?)?;
    print_info(&format!("median working hours = {}", median_hrs));

    let treated = treatment.iter().filter(|&&t| t == 1).count();
    let control = treatment.len() - treated;
    df.with_column(Column::new(columns.hour_col.as_str().into(), treatment))?;
    println!(
        "      Treatment distribution: {} treated / {} control",
        style(treated).yellow().bold(),
        style(control).yellow().bold()
    );
    summary.set_treatment_counts(treated, control);

    // Negate the cost column so higher values mean cheaper outcomes
    let negated: Vec<Option<f64>> = pipeline::select::numeric_values(&df, &columns.cost_col)?
        .into_iter()
        .map(|v| v.map(|c| -c))
        .collect();
    df.with_column(Column::new(columns.cost_col.as_str().into(), negated))?;
    print_success("Cost column negated into the cost target");
    print_step_time(step_start.elapsed());

    // Step 4: One-hot encoding
    // Encoding runs on the full dataset BEFORE splitting so every partition
    // shares one indicator column schema
    print_step_header(4, "One-Hot Encoding");

    let step_start = Instant::now();
    let screening = ScreeningOptions {
        show_all_columns: cli.show_all_columns,
    };
    let encoded = encode(&df, &columns.categorical_cols, Some(&screening))?;
    print_success("Categorical features encoded");
    print_count("column(s) after encoding", encoded.width(), None);
    summary.set_encoded_width(encoded.width());
    print_step_time(step_start.elapsed());

    // Step 5: Stratified split
    print_step_header(5, "Stratified Split");

    let step_start = Instant::now();
    let options = SplitOptions {
        seed: config.split.seed,
        train_fraction: config.split.train_fraction,
    };
    let (mut train, mut valid, mut test) = split(&encoded, &columns.hour_col, &options)?;
    println!("      Training data:   {} rows", style(train.height()).yellow().bold());
    println!("      Validation data: {} rows", style(valid.height()).yellow().bold());
    println!("      Test data:       {} rows", style(test.height()).yellow().bold());
    summary.set_partitions(train.height(), valid.height(), test.height());
    print_step_time(step_start.elapsed());

    // Step 6: Save partitions
    print_step_header(6, "Save Partitions");

    let step_start = Instant::now();
    let outputs = &config.datasets.processed;
    for path in [&outputs.train, &outputs.valid, &outputs.test] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
    }

    let spinner = create_spinner("Writing partitions...");
    save_dataset(&mut train, &outputs.train)?;
    save_dataset(&mut valid, &outputs.valid)?;
    save_dataset(&mut test, &outputs.test)?;
    finish_with_success(
        &spinner,
        &format!(
            "Saved train/valid/test to {}",
            outputs
                .train
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."))
                .display()
        ),
    );
    print_step_time(step_start.elapsed());

    // Display summary
    summary.display();

    // Optional JSON run report
    if let Some(report_path) = &cli.report {
        let input_display = config.datasets.raw.display().to_string();
        export_prep_report(
            &summary,
            report_path,
            &ExportParams {
                input_file: &input_display,
                seed: config.split.seed,
                train_fraction: config.split.train_fraction,
                treatment_median: median_hrs,
            },
        )?;
        print_info(&format!("Run report written to {}", report_path.display()));
    }

    // Final completion message
    print_completion();

    Ok(())
}
