use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::model::TextBlock;
use crate::export::Exporter;
use crate::pipeline::PipelineOutput;

#[derive(Debug, Clone)]
pub struct TextExporter {
    out_dir: PathBuf,
}

impl TextExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    fn format_blocks(blocks: &[TextBlock]) -> String {
        let mut text = String::new();
        for block in blocks {
            let bbox = block.bbox();
            text.push_str(&format!(
                "[block x:{:.0} y:{:.0} w:{:.0} h:{:.0}]\n",
                bbox.min_x(),
                bbox.min_y(),
                bbox.width(),
                bbox.height()
            ));
            text.push_str(&block.text_content());
            text.push_str("\n\n");
        }
        text
    }
}

impl Exporter for TextExporter {
    fn export(&self, output: &PipelineOutput) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;

        // One reconstructed line per row
        let mut lines = String::new();
        for fragment in &output.lines {
            lines.push_str(&fragment.text);
            lines.push('\n');
        }
        let path = self.out_dir.join("lines.txt");
        fs::write(&path, lines).with_context(|| format!("failed to write {}", path.display()))?;

        if let Some(blocks) = &output.blocks {
            let path = self.out_dir.join("blocks.txt");
            fs::write(&path, Self::format_blocks(blocks))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        Ok(())
    }
}
