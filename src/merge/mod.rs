pub mod classify;
pub mod pool;
pub mod union;

pub use classify::{classify, MergeKind};
pub use pool::{FragmentPool, Stage};
pub use union::union;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MergeConfig;
use crate::core::model::Fragment;

pub trait MergeEngine {
    fn run_stages(&self, fragments: Vec<Fragment>) -> StagedRun;

    fn run_with_report(&self, fragments: Vec<Fragment>) -> (Vec<Fragment>, RunReport) {
        let run = self.run_stages(fragments);
        (run.lines, run.report)
    }

    /// Merges a reading-ordered seed pool into line-level fragments.
    fn run(&self, fragments: Vec<Fragment>) -> Vec<Fragment> {
        self.run_with_report(fragments).0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundStats {
    pub stage: Stage,
    /// 1-based within the stage.
    pub round: usize,
    pub pool_in: usize,
    pub pool_out: usize,
    pub merges: usize,
    pub discarded: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunReport {
    pub rounds: Vec<RoundStats>,
}

impl RunReport {
    pub fn total_merges(&self) -> usize {
        self.rounds.iter().map(|r| r.merges).sum()
    }

    pub fn rounds_in(&self, stage: Stage) -> usize {
        self.rounds.iter().filter(|r| r.stage == stage).count()
    }
}

/// Output of each stage of a merge run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StagedRun {
    /// Stage A result, in the order Stage B consumes it.
    pub phrases: Vec<Fragment>,
    pub lines: Vec<Fragment>,
    pub report: RunReport,
}

/// Two-stage greedy agglomerative merger.
///
/// Stage A runs horizontal absorb rounds, dropping short noise fragments
/// after each and reversing the pool between them so a neighbor skipped in
/// one scan direction is reachable from the other. The round count is a
/// heuristic, not a proven fixed point. Stage B runs a single vertical
/// round on the result.
#[derive(Debug, Clone, Default)]
pub struct GreedyMergeEngine {
    config: MergeConfig,
}

impl GreedyMergeEngine {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    fn horizontal_stage(&self, pool: &mut FragmentPool, report: &mut RunReport) {
        let strategy = self.config.horizontal_rounds;
        let max_rounds = strategy.max_rounds();
        let mut reversals = 0;
        let mut quiet_rounds = 0;

        for round in 1..=max_rounds {
            let pool_in = pool.len();
            let merges = pool.absorb_round(Stage::Horizontal, &self.config);
            let discarded = pool.discard_short(self.config.noise_max_chars);
            pool.reverse();
            reversals += 1;

            let stats = RoundStats {
                stage: Stage::Horizontal,
                round,
                pool_in,
                pool_out: pool.len(),
                merges,
                discarded,
            };
            debug!(?stats, "horizontal round finished");
            report.rounds.push(stats);

            // Stable once a full scan in each direction merged nothing.
            quiet_rounds = if merges == 0 { quiet_rounds + 1 } else { 0 };
            if strategy.stops_when_stable() && quiet_rounds >= 2 {
                break;
            }
        }

        // An early stop can leave the pool mirrored; hand Stage B the seed orientation.
        if strategy.stops_when_stable() && reversals % 2 == 1 {
            pool.reverse();
        }
    }

    fn vertical_stage(&self, pool: &mut FragmentPool, report: &mut RunReport) {
        let pool_in = pool.len();
        let merges = pool.absorb_round(Stage::Vertical, &self.config);
        let stats = RoundStats {
            stage: Stage::Vertical,
            round: 1,
            pool_in,
            pool_out: pool.len(),
            merges,
            discarded: 0,
        };
        debug!(?stats, "vertical round finished");
        report.rounds.push(stats);
    }
}

impl MergeEngine for GreedyMergeEngine {
    fn run_stages(&self, fragments: Vec<Fragment>) -> StagedRun {
        let mut report = RunReport::default();
        let mut pool = FragmentPool::new(fragments);

        self.horizontal_stage(&mut pool, &mut report);
        let phrases: Vec<Fragment> = pool.iter().cloned().collect();
        self.vertical_stage(&mut pool, &mut report);

        debug!(
            phrases = phrases.len(),
            lines = pool.len(),
            merges = report.total_merges(),
            "merge run finished"
        );
        StagedRun {
            phrases,
            lines: pool.into_fragments(),
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundStrategy;
    use crate::core::geometry::BoundingQuad;
    use pretty_assertions::assert_eq;

    fn frag(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> Fragment {
        Fragment::new(text, BoundingQuad::from_extent(x0, y0, x1, y1))
    }

    fn texts(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn single_character_line_is_dropped_as_noise() {
        let engine = GreedyMergeEngine::default();
        let out = engine.run(vec![
            frag("A", 0.0, 0.0, 10.0, 20.0),
            frag("B", 10.0, 0.0, 20.0, 20.0),
            frag("C", 0.0, 25.0, 10.0, 45.0),
        ]);
        assert_eq!(texts(&out), vec!["AB"]);
    }

    #[test]
    fn horizontal_then_vertical_builds_block() {
        let engine = GreedyMergeEngine::default();
        let (out, report) = engine.run_with_report(vec![
            frag("A", 0.0, 0.0, 10.0, 20.0),
            frag("B", 10.0, 0.0, 20.0, 20.0),
            frag("Cc", 0.0, 25.0, 10.0, 45.0),
        ]);

        assert_eq!(texts(&out), vec!["ABCc"]);
        assert_eq!(out[0].bbox, BoundingQuad::from_extent(0.0, 0.0, 20.0, 45.0));
        assert_eq!(out[0].font_size, 20);

        assert_eq!(report.rounds_in(Stage::Horizontal), 4);
        assert_eq!(report.rounds_in(Stage::Vertical), 1);
        assert_eq!(report.rounds[0].merges, 1);
        assert_eq!(report.rounds[4].merges, 1);
        assert_eq!(report.total_merges(), 2);
    }

    #[test]
    fn staged_run_keeps_horizontal_phrases() {
        let run = GreedyMergeEngine::default().run_stages(vec![
            frag("A", 0.0, 0.0, 10.0, 20.0),
            frag("B", 10.0, 0.0, 20.0, 20.0),
            frag("Cc", 0.0, 25.0, 10.0, 45.0),
        ]);

        assert_eq!(texts(&run.phrases), vec!["AB", "Cc"]);
        assert_eq!(texts(&run.lines), vec!["ABCc"]);
        assert_eq!(run.report.rounds[4].pool_in, run.phrases.len());
    }

    #[test]
    fn later_round_recovers_blocked_merge() {
        let engine = GreedyMergeEngine::default();
        let (out, report) = engine.run_with_report(vec![
            frag("ab", 0.0, 0.0, 20.0, 20.0),
            frag("ef", 40.0, 0.0, 60.0, 20.0),
            frag("cd", 20.0, 0.0, 40.0, 20.0),
        ]);
        assert_eq!(texts(&out), vec!["abcdef"]);
        // Round 1 merges "ab"+"cd" but has already scanned past "ef".
        assert_eq!(report.rounds[0].merges, 1);
        assert_eq!(report.rounds[1].merges, 0);
        assert_eq!(report.rounds[2].merges, 1);
    }

    #[test]
    fn noise_filter_runs_before_vertical_stage() {
        let engine = GreedyMergeEngine::default();
        let (out, report) = engine.run_with_report(vec![
            frag("line", 0.0, 0.0, 80.0, 20.0),
            frag("・", 0.0, 22.0, 10.0, 42.0),
        ]);
        assert_eq!(texts(&out), vec!["line"]);
        assert_eq!(report.rounds[0].discarded, 1);
        assert_eq!(report.rounds[4].pool_in, 1);
    }

    #[test]
    fn empty_and_single_pools_pass_through() {
        let engine = GreedyMergeEngine::default();
        assert!(engine.run(Vec::new()).is_empty());

        let only = frag("alone", 0.0, 0.0, 100.0, 20.0);
        assert_eq!(engine.run(vec![only.clone()]), vec![only]);
    }

    #[test]
    fn until_stable_stops_after_quiet_rounds() {
        let config = MergeConfig {
            horizontal_rounds: RoundStrategy::UntilStable { max_rounds: 10 },
            ..MergeConfig::default()
        };
        let engine = GreedyMergeEngine::new(config);
        let (out, report) = engine.run_with_report(vec![
            frag("ab", 0.0, 0.0, 20.0, 20.0),
            frag("cd", 20.0, 0.0, 40.0, 20.0),
            frag("xy", 400.0, 300.0, 420.0, 320.0),
        ]);

        assert_eq!(report.rounds_in(Stage::Horizontal), 3);
        assert_eq!(texts(&out), vec!["abcd", "xy"]);
    }

    #[test]
    fn every_round_shrinks_or_keeps_pool() {
        let engine = GreedyMergeEngine::default();
        let fragments: Vec<Fragment> = (0..12)
            .map(|i| {
                let x = (i % 4) as f32 * 20.0;
                let y = (i / 4) as f32 * 60.0;
                frag("xx", x, y, x + 20.0, y + 20.0)
            })
            .collect();
        let (out, report) = engine.run_with_report(fragments);

        for stats in &report.rounds {
            assert_eq!(stats.pool_out, stats.pool_in - stats.merges - stats.discarded);
        }
        assert_eq!(texts(&out), vec!["xxxxxxxx"; 3]);
    }
}
