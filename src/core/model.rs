use serde::{Deserialize, Serialize};

use crate::core::geometry::BoundingQuad;

/// One recognized text span with its quad and derived font size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub bbox: BoundingQuad,
    pub font_size: u32,
}

impl Fragment {
    /// Builds a fragment whose font size is the vertical extent of `bbox`.
    pub fn new(text: impl Into<String>, bbox: BoundingQuad) -> Self {
        let font_size = bbox.height() as u32;
        Self {
            text: text.into(),
            bbox,
            font_size,
        }
    }

    pub fn with_font_size(text: impl Into<String>, bbox: BoundingQuad, font_size: u32) -> Self {
        Self {
            text: text.into(),
            bbox,
            font_size,
        }
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Fragments grouped by density clustering of their centroids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextBlock {
    /// `None` for DBSCAN noise points.
    pub label: Option<usize>,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub texts: Vec<String>,
}

impl TextBlock {
    pub fn bbox(&self) -> BoundingQuad {
        BoundingQuad::from_extent(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    pub fn text_content(&self) -> String {
        self.texts.join("\n")
    }
}
