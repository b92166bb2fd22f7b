use serde::{Deserialize, Serialize};

use crate::config::MergeConfig;
use crate::core::model::Fragment;

/// How a candidate relates to a basis fragment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MergeKind {
    None,
    /// Candidate continues the basis on the same line, to its right.
    Horizontal,
    /// Candidate continues the basis on a following line.
    Vertical,
}

/// Classifies the ordered pair `(basis, candidate)`.
///
/// Horizontal wins over vertical. The check is directional: the basis must
/// sit to the left of the candidate, so swapping the arguments can change
/// the answer.
pub fn classify(basis: &Fragment, candidate: &Fragment, config: &MergeConfig) -> MergeKind {
    if is_horizontal(basis, candidate, config) {
        MergeKind::Horizontal
    } else if is_vertical(basis, candidate, config) {
        MergeKind::Vertical
    } else {
        MergeKind::None
    }
}

fn font_sizes(basis: &Fragment, candidate: &Fragment) -> (f32, f32) {
    (basis.font_size as f32, candidate.font_size as f32)
}

pub fn is_horizontal(basis: &Fragment, candidate: &Fragment, config: &MergeConfig) -> bool {
    let (fs1, fs2) = font_sizes(basis, candidate);
    let min_fs = fs1.min(fs2);
    let max_fs = fs1.max(fs2);
    if min_fs == 0.0 {
        return false;
    }

    let br = basis.bbox.bottom_right();
    let bl = candidate.bbox.bottom_left();
    (br.y - bl.y).abs() <= config.baseline_tolerance * fs1
        && (br.x - bl.x).abs() <= config.horizontal_gap * min_fs
        && max_fs / min_fs <= config.max_font_ratio
}

pub fn is_vertical(basis: &Fragment, candidate: &Fragment, config: &MergeConfig) -> bool {
    center_aligned(basis, candidate, config)
        || left_aligned(basis, candidate, config)
        || right_aligned(basis, candidate, config)
}

fn center_aligned(basis: &Fragment, candidate: &Fragment, config: &MergeConfig) -> bool {
    let (fs1, fs2) = font_sizes(basis, candidate);
    let (cx1, cy1) = basis.bbox.centroid();
    let (cx2, cy2) = candidate.bbox.centroid();
    let mean_height = (basis.bbox.height() + candidate.bbox.height()) / 2.0;

    (cx1 - cx2).abs() <= config.center_dx * fs1.max(fs2)
        && (cy1 - cy2).abs() <= config.center_dy * mean_height
}

fn left_aligned(basis: &Fragment, candidate: &Fragment, config: &MergeConfig) -> bool {
    let (fs1, fs2) = font_sizes(basis, candidate);
    let max_fs = fs1.max(fs2);
    let tl1 = basis.bbox.top_left();
    let bl1 = basis.bbox.bottom_left();
    let tl2 = candidate.bbox.top_left();

    (tl1.x - tl2.x).abs() <= config.left_dx * max_fs
        && (bl1.y - tl2.y).abs() <= config.left_gap * max_fs
}

fn right_aligned(basis: &Fragment, candidate: &Fragment, config: &MergeConfig) -> bool {
    let (fs1, fs2) = font_sizes(basis, candidate);
    let min_fs = fs1.min(fs2);
    if min_fs == 0.0 {
        return false;
    }

    let br1 = basis.bbox.bottom_right();
    let bl1 = basis.bbox.bottom_left();
    let br2 = candidate.bbox.bottom_right();
    let tl2 = candidate.bbox.top_left();

    (br1.x - br2.x).abs() <= config.right_dx * fs1.max(fs2)
        && (bl1.y - tl2.y).abs() <= config.right_gap * min_fs
}
