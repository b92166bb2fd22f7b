pub mod geometry;
pub mod model;

pub use geometry::{BoundingQuad, Vertex};
pub use model::{Fragment, TextBlock};
