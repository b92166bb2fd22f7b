use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cluster::cluster_blocks;
use crate::config::AppConfig;
use crate::core::model::{Fragment, TextBlock};
use crate::export::{Exporter, JsonExporter, TextExporter};
use crate::merge::{GreedyMergeEngine, MergeEngine, RunReport};
use crate::ocr::{parse_response, prepare_fragments, RawAnnotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Text,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub response_index: usize,
    pub cluster: bool,
    pub app: AppConfig,
}

impl PipelineConfig {
    pub fn new(input: PathBuf, output: PathBuf, app: AppConfig) -> Self {
        Self {
            input,
            output,
            response_index: 0,
            cluster: false,
            app,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Normalized annotations in reading order, as seeded into the engine.
    pub fragments: Vec<Fragment>,
    /// Horizontal-stage phrases.
    pub phrases: Vec<Fragment>,
    pub lines: Vec<Fragment>,
    pub report: RunReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<TextBlock>>,
}

/// Normalizes, sorts and merges already-parsed annotations.
pub fn process_annotations(
    annotations: &[RawAnnotation],
    config: &AppConfig,
    cluster: bool,
) -> PipelineOutput {
    let fragments = prepare_fragments(annotations, &config.normalize);
    let engine = GreedyMergeEngine::new(config.merge.clone());
    let run = engine.run_stages(fragments.clone());
    info!(
        fragments = fragments.len(),
        phrases = run.phrases.len(),
        lines = run.lines.len(),
        "reconstructed lines"
    );

    let blocks = cluster.then(|| cluster_blocks(&run.lines, &config.cluster));
    PipelineOutput {
        fragments,
        phrases: run.phrases,
        lines: run.lines,
        report: run.report,
        blocks,
    }
}

/// Runs the pipeline over a text-detection response document.
pub fn process_response(
    json: &str,
    response_index: usize,
    config: &AppConfig,
    cluster: bool,
) -> Result<PipelineOutput> {
    let annotations = parse_response(json, response_index)?;
    Ok(process_annotations(&annotations, config, cluster))
}

pub fn build_lines(config: &PipelineConfig) -> Result<PipelineOutput> {
    let json = fs::read_to_string(&config.input)
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    process_response(&json, config.response_index, &config.app, config.cluster)
        .with_context(|| format!("failed to process {}", config.input.display()))
}

pub fn export_lines(output: &PipelineOutput, dir: &Path, formats: &[ExportFormat]) -> Result<()> {
    for format in formats {
        match format {
            ExportFormat::Json => JsonExporter::new(dir.to_path_buf()).export(output)?,
            ExportFormat::Text => TextExporter::new(dir.to_path_buf()).export(output)?,
        }
    }
    Ok(())
}
