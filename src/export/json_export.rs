use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::export::Exporter;
use crate::pipeline::PipelineOutput;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.out_dir.join(name);
        let data = serde_json::to_string_pretty(value)?;
        fs::write(&path, data).with_context(|| format!("failed to write {}", path.display()))
    }
}

impl Exporter for JsonExporter {
    fn export(&self, output: &PipelineOutput) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;

        self.write("fragments.json", &output.fragments)?;
        self.write("phrases.json", &output.phrases)?;
        self.write("lines.json", &output.lines)?;
        self.write("report.json", &output.report)?;
        if let Some(blocks) = &output.blocks {
            self.write("blocks.json", blocks)?;
        }
        Ok(())
    }
}
