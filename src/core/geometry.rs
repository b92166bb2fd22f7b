use serde::{Deserialize, Serialize};

pub const TOP_LEFT: usize = 0;
pub const TOP_RIGHT: usize = 1;
pub const BOTTOM_RIGHT: usize = 2;
pub const BOTTOM_LEFT: usize = 3;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

impl Vertex {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Four vertices in TL, TR, BR, BL order.
///
/// Quads coming from an OCR engine may be rotated or skewed; quads built by
/// [`BoundingQuad::from_extent`] or [`BoundingQuad::union`] are always
/// axis-aligned.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BoundingQuad {
    pub vertices: [Vertex; 4],
}

impl BoundingQuad {
    pub fn new(vertices: [Vertex; 4]) -> Self {
        Self { vertices }
    }

    pub fn from_extent(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            vertices: [
                Vertex::new(x0, y0),
                Vertex::new(x1, y0),
                Vertex::new(x1, y1),
                Vertex::new(x0, y1),
            ],
        }
    }

    pub fn top_left(&self) -> Vertex {
        self.vertices[TOP_LEFT]
    }

    pub fn top_right(&self) -> Vertex {
        self.vertices[TOP_RIGHT]
    }

    pub fn bottom_right(&self) -> Vertex {
        self.vertices[BOTTOM_RIGHT]
    }

    pub fn bottom_left(&self) -> Vertex {
        self.vertices[BOTTOM_LEFT]
    }

    pub fn min_x(&self) -> f32 {
        self.vertices.iter().map(|v| v.x).fold(f32::INFINITY, f32::min)
    }

    pub fn max_x(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.x)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn min_y(&self) -> f32 {
        self.vertices.iter().map(|v| v.y).fold(f32::INFINITY, f32::min)
    }

    pub fn max_y(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.y)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Vertical extent of the quad.
    pub fn height(&self) -> f32 {
        (self.max_y() - self.min_y()).max(0.0)
    }

    pub fn width(&self) -> f32 {
        (self.max_x() - self.min_x()).max(0.0)
    }

    /// Mean of the four vertices.
    pub fn centroid(&self) -> (f32, f32) {
        let sx: f32 = self.vertices.iter().map(|v| v.x).sum();
        let sy: f32 = self.vertices.iter().map(|v| v.y).sum();
        (sx / 4.0, sy / 4.0)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::from_extent(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    pub fn is_axis_aligned(&self) -> bool {
        let [tl, tr, br, bl] = self.vertices;
        tl.x == bl.x && tr.x == br.x && tl.y == tr.y && bl.y == br.y
    }
}
