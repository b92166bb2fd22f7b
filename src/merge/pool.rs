use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::MergeConfig;
use crate::core::model::Fragment;
use crate::merge::classify::{classify, MergeKind};
use crate::merge::union::union;

/// Which classification a round absorbs on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Horizontal,
    Vertical,
}

impl Stage {
    pub fn merge_kind(self) -> MergeKind {
        match self {
            Stage::Horizontal => MergeKind::Horizontal,
            Stage::Vertical => MergeKind::Vertical,
        }
    }
}

/// Working set of a merge run.
///
/// Fragments live in an append-only arena; `active` holds the indices of
/// the fragments still in play, in pool order. A merge pushes the union
/// onto the arena and swaps the basis index for it, so absorbed inputs stay
/// addressable until the pool is consumed.
#[derive(Debug, Clone, Default)]
pub struct FragmentPool {
    arena: Vec<Fragment>,
    active: Vec<usize>,
}

impl FragmentPool {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        let active = (0..fragments.len()).collect();
        Self {
            arena: fragments,
            active,
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Active fragments in pool order.
    pub fn iter(&self) -> impl Iterator<Item = &Fragment> + '_ {
        self.active.iter().map(move |&idx| &self.arena[idx])
    }

    /// Runs one absorb-and-rescan pass and returns the number of merges.
    ///
    /// The front fragment becomes the basis and absorbs, in order, every
    /// later fragment that classifies as `stage` against the growing basis.
    /// Absorbed fragments leave the pending queue, so each merge shrinks it
    /// by one and the pass terminates. Finalized bases keep their position.
    pub fn absorb_round(&mut self, stage: Stage, config: &MergeConfig) -> usize {
        let kind = stage.merge_kind();
        let mut pending: VecDeque<usize> = std::mem::take(&mut self.active).into();
        let mut finalized = Vec::with_capacity(pending.len());
        let mut merges = 0;

        while let Some(mut basis) = pending.pop_front() {
            let mut cursor = 0;
            while cursor < pending.len() {
                let candidate = pending[cursor];
                if classify(&self.arena[basis], &self.arena[candidate], config) == kind {
                    let merged = union(&self.arena[basis], &self.arena[candidate]);
                    trace!(
                        ?stage,
                        basis = %self.arena[basis].text,
                        candidate = %self.arena[candidate].text,
                        "absorbed fragment"
                    );
                    self.arena.push(merged);
                    basis = self.arena.len() - 1;
                    pending.remove(cursor);
                    merges += 1;
                } else {
                    cursor += 1;
                }
            }
            finalized.push(basis);
        }

        self.active = finalized;
        merges
    }

    /// Drops active fragments with at most `max_chars` characters and
    /// returns how many were dropped.
    pub fn discard_short(&mut self, max_chars: usize) -> usize {
        let before = self.active.len();
        let arena = &self.arena;
        self.active.retain(|&idx| arena[idx].char_len() > max_chars);
        before - self.active.len()
    }

    pub fn reverse(&mut self) {
        self.active.reverse();
    }

    /// Moves the active fragments out in pool order.
    pub fn into_fragments(self) -> Vec<Fragment> {
        let mut slots: Vec<Option<Fragment>> = self.arena.into_iter().map(Some).collect();
        self.active
            .iter()
            .filter_map(|&idx| slots[idx].take())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BoundingQuad;
    use pretty_assertions::assert_eq;

    fn frag(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> Fragment {
        Fragment::new(text, BoundingQuad::from_extent(x0, y0, x1, y1))
    }

    fn texts(pool: &FragmentPool) -> Vec<String> {
        pool.iter().map(|f| f.text.clone()).collect()
    }

    #[test]
    fn absorption_cascades_along_a_line() {
        let mut pool = FragmentPool::new(vec![
            frag("今", 0.0, 0.0, 20.0, 20.0),
            frag("日", 20.0, 0.0, 40.0, 20.0),
            frag("は", 40.0, 0.0, 60.0, 20.0),
        ]);
        let merges = pool.absorb_round(Stage::Horizontal, &MergeConfig::default());
        assert_eq!(merges, 2);
        assert_eq!(texts(&pool), vec!["今日は"]);
    }

    #[test]
    fn one_directional_scan_misses_out_of_order_neighbor() {
        // "c" precedes "b" in the pool, so "a" cannot reach it until "b" is absorbed
        // and the scan has already moved past it.
        let mut pool = FragmentPool::new(vec![
            frag("a", 0.0, 0.0, 20.0, 20.0),
            frag("c", 40.0, 0.0, 60.0, 20.0),
            frag("b", 20.0, 0.0, 40.0, 20.0),
        ]);
        let config = MergeConfig::default();
        assert_eq!(pool.absorb_round(Stage::Horizontal, &config), 1);
        assert_eq!(texts(&pool), vec!["ab", "c"]);

        // Rescanning the resulting pool picks it up.
        assert_eq!(pool.absorb_round(Stage::Horizontal, &config), 1);
        assert_eq!(texts(&pool), vec!["abc"]);
    }

    #[test]
    fn arena_keeps_absorbed_inputs_addressable() {
        let mut pool = FragmentPool::new(vec![
            frag("a", 0.0, 0.0, 20.0, 20.0),
            frag("b", 20.0, 0.0, 40.0, 20.0),
        ]);
        pool.absorb_round(Stage::Horizontal, &MergeConfig::default());
        assert_eq!(pool.active, vec![2]);
        assert_eq!(pool.arena[0].text, "a");
        assert_eq!(pool.arena[2].text, "ab");
    }

    #[test]
    fn discard_short_counts_removed() {
        let mut pool = FragmentPool::new(vec![
            frag("ab", 0.0, 0.0, 20.0, 20.0),
            frag("。", 300.0, 0.0, 310.0, 20.0),
            frag("", 400.0, 0.0, 410.0, 20.0),
        ]);
        assert_eq!(pool.discard_short(1), 2);
        assert_eq!(texts(&pool), vec!["ab"]);
    }

    #[test]
    fn empty_pool_round_is_noop() {
        let mut pool = FragmentPool::new(Vec::new());
        assert_eq!(pool.absorb_round(Stage::Vertical, &MergeConfig::default()), 0);
        assert!(pool.is_empty());
        assert!(pool.into_fragments().is_empty());
    }

    #[test]
    fn reverse_and_into_fragments_follow_pool_order() {
        let mut pool = FragmentPool::new(vec![
            frag("ab", 0.0, 0.0, 20.0, 20.0),
            frag("cd", 300.0, 300.0, 320.0, 320.0),
        ]);
        pool.reverse();
        let out: Vec<String> = pool.into_fragments().into_iter().map(|f| f.text).collect();
        assert_eq!(out, vec!["cd", "ab"]);
    }
}
