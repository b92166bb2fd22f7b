//! Groups merged lines into blocks by centroid density.
//!
//! This is a reporting step over the merge output; it never feeds back into
//! merging.

pub mod dbscan;

pub use dbscan::dbscan;

use crate::config::ClusterConfig;
use crate::core::model::{Fragment, TextBlock};

/// Clusters fragment centroids and returns one block per cluster, in order
/// of first appearance. Each noise fragment becomes its own unlabeled block.
pub fn cluster_blocks(fragments: &[Fragment], config: &ClusterConfig) -> Vec<TextBlock> {
    let centers: Vec<(f32, f32)> = fragments.iter().map(|f| f.bbox.centroid()).collect();
    let labels = dbscan(&centers, config.eps, config.min_samples);

    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut slot_of_label: Vec<Option<usize>> = Vec::new();

    for (fragment, label) in fragments.iter().zip(labels) {
        let bbox = &fragment.bbox;
        let existing = label.and_then(|l| slot_of_label.get(l).copied().flatten());

        match existing {
            Some(slot) => {
                let block = &mut blocks[slot];
                block.min_x = block.min_x.min(bbox.min_x());
                block.min_y = block.min_y.min(bbox.min_y());
                block.max_x = block.max_x.max(bbox.max_x());
                block.max_y = block.max_y.max(bbox.max_y());
                block.texts.push(fragment.text.clone());
            }
            None => {
                if let Some(l) = label {
                    if slot_of_label.len() <= l {
                        slot_of_label.resize(l + 1, None);
                    }
                    slot_of_label[l] = Some(blocks.len());
                }
                blocks.push(TextBlock {
                    label,
                    min_x: bbox.min_x(),
                    min_y: bbox.min_y(),
                    max_x: bbox.max_x(),
                    max_y: bbox.max_y(),
                    texts: vec![fragment.text.clone()],
                });
            }
        }
    }

    blocks
}
