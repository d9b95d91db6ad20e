// src/cli/mod.rs
//
// Command-line interface: collect image files, run the corroboration
// pipeline over them on the rayon pool, and print or serialize reports.

mod args;
mod output;

pub use args::Args;
pub use output::{print_report, print_summary};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;

use crate::config::Thresholds;
use crate::core::{decode_file, CorroborationAnalyzer, CorroborationReport, ExternalFindings};

const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "tif", "tiff", "bmp", "webp"];

/// Envelope written around each report in JSON mode. Ids and timestamps
/// live here, outside the deterministic engine results.
#[derive(Debug, Serialize)]
pub struct AnalysisRecord {
    pub report_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub source: String,
    pub report: CorroborationReport,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let thresholds = match &args.calibration {
        Some(path) => Thresholds::from_json_file(path)
            .with_context(|| format!("Failed to load calibration from {}", path.display()))?,
        None => Thresholds::default(),
    };

    let files = collect_image_files(&args.input)?;
    if files.is_empty() {
        bail!("No image files found under {}", args.input.display());
    }

    let analyzer = CorroborationAnalyzer::builder().thresholds(thresholds).build();
    let external = ExternalFindings::default();

    let bar = if files.len() > 1 && !args.json {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .expect("static template"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let outcomes: Vec<(String, Result<CorroborationReport, String>)> = files
        .par_iter()
        .progress_with(bar)
        .map(|path| {
            let source = path.display().to_string();
            let report = decode_file(path, args.remote)
                .map_err(|e| e.to_string())
                .and_then(|sample| {
                    analyzer
                        .analyze_sample(&sample, &external)
                        .map_err(|e| e.to_string())
                });
            (source, report)
        })
        .collect();

    let mut results = Vec::new();
    let mut failures = 0usize;
    for (source, outcome) in outcomes {
        match outcome {
            Ok(report) => results.push((source, report)),
            Err(message) => {
                failures += 1;
                eprintln!("{source}: {message}");
            }
        }
    }

    if args.json {
        let records: Vec<AnalysisRecord> = results
            .into_iter()
            .map(|(source, report)| AnalysisRecord {
                report_id: Uuid::new_v4(),
                analyzed_at: Utc::now(),
                source,
                report,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for (source, report) in &results {
            print_report(source, report, args.verbose);
        }
        print_summary(&results, failures);
    }

    if failures > 0 {
        bail!("{failures} file(s) failed to analyze");
    }
    Ok(())
}

fn collect_image_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if has_image_extension(path) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.path().is_file() && has_image_extension(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
        files.sort();
    } else {
        bail!("Input path does not exist: {}", path.display());
    }

    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extension_filter() {
        assert!(has_image_extension(Path::new("scan.JPG")));
        assert!(has_image_extension(Path::new("dir/photo.png")));
        assert!(!has_image_extension(Path::new("notes.txt")));
        assert!(!has_image_extension(Path::new("no_extension")));
    }
}
