use crate::pipeline::RunSummary;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, summary: &RunSummary) -> Result<()> {
        let report = JsonReport::from_summary(summary);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    dry_run: bool,
    cleaned: usize,
    normalized: usize,
    rewritten: usize,
    generated: usize,
    wrappers: Vec<JsonWrapper>,
    skipped: Vec<JsonSkipped>,
}

#[derive(Serialize)]
struct JsonWrapper {
    name: String,
    origin: &'static str,
    sprite_ref: String,
    view_box: String,
    source: String,
    output: String,
    replaced: Option<String>,
}

#[derive(Serialize)]
struct JsonSkipped {
    path: String,
    stage: &'static str,
    reason: String,
}

impl JsonReport {
    fn from_summary(summary: &RunSummary) -> Self {
        let wrappers: Vec<JsonWrapper> = summary
            .wrappers
            .iter()
            .map(|w| JsonWrapper {
                name: w.name.clone(),
                origin: w.origin.as_str(),
                sprite_ref: w.sprite_ref.clone(),
                view_box: w.view_box.clone(),
                source: w.source_path.to_string_lossy().to_string(),
                output: w.output_path.to_string_lossy().to_string(),
                replaced: w
                    .replaced
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
            })
            .collect();

        let skipped: Vec<JsonSkipped> = summary
            .skipped
            .iter()
            .map(|s| JsonSkipped {
                path: s.path.to_string_lossy().to_string(),
                stage: s.stage,
                reason: s.reason.clone(),
            })
            .collect();

        Self {
            version: "1.0",
            dry_run: summary.dry_run,
            cleaned: summary.cleaned,
            normalized: summary.normalized,
            rewritten: summary.rewritten,
            generated: summary.wrappers.len(),
            wrappers,
            skipped,
        }
    }
}
