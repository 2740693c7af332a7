use serde::Serialize;

use crate::config::HighlightTolerance;
use crate::presets::{AspectRatio, KaraokePalette, KaraokeStyle};
use crate::timeline::duration::ReconciledDuration;
use crate::timeline::highlight::active_word_index;
use crate::timeline::scenes::scene_index_at;
use crate::types::{Scene, SubtitleSegment, TimingSource, WordTiming};

/// Frame rate the renderer uses unless told otherwise.
pub const DEFAULT_FPS: u32 = 30;

/// Both schedules for one session, handed to the renderer.
///
/// Immutable once built; every query is a pure function of the plan and the
/// requested time, so frames can be produced from many threads at once.
#[derive(Debug, Clone, Serialize)]
pub struct TimelinePlan {
    pub session_id: String,
    pub duration: ReconciledDuration,
    pub timing_source: TimingSource,
    pub words: Vec<WordTiming>,
    pub segments: Vec<SubtitleSegment>,
    pub scenes: Vec<Scene>,
    pub highlight: HighlightTolerance,
    pub style: KaraokeStyle,
    /// Colours of `style`, resolved for the renderer.
    pub palette: KaraokePalette,
    /// Fill colour for [`SceneAsset::Placeholder`](crate::types::SceneAsset) scenes.
    pub placeholder_rgb: [u8; 3],
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWord {
    pub segment: usize,
    pub word: usize,
}

impl TimelinePlan {
    pub fn duration_secs(&self) -> f64 {
        self.duration.secs
    }

    /// Segment on screen at absolute time `t`.
    pub fn segment_at(&self, t: f64) -> Option<usize> {
        if !(0.0..=self.duration.secs).contains(&t) {
            return None;
        }
        self.segments
            .iter()
            .position(|s| s.start_time <= t && t <= s.end_time)
    }

    /// Highlighted word at absolute time `t`, if any.
    ///
    /// Segments are searched with their bounds widened by the highlight
    /// tolerances, so a word stays lit just past its segment's end and the
    /// first word of the next segment lights up just before it starts. A
    /// direct hit in any segment beats a gap snap; among snaps the nearest
    /// word wins, the earlier one on ties.
    pub fn active_word_at(&self, t: f64) -> Option<ActiveWord> {
        if !(0.0..=self.duration.secs).contains(&t) {
            return None;
        }
        let margin = self
            .highlight
            .forward_tolerance_secs
            .max(self.highlight.gap_tolerance_secs);
        let candidates = || {
            self.segments
                .iter()
                .enumerate()
                .filter(move |(_, s)| s.start_time - margin <= t && t <= s.end_time + margin)
        };

        let direct_only = HighlightTolerance {
            gap_tolerance_secs: 0.0,
            ..self.highlight
        };
        let direct = candidates().find_map(|(segment, seg)| {
            active_word_index(&seg.words, seg.start_time, t - seg.start_time, &direct_only)
                .map(|word| ActiveWord { segment, word })
        });
        if direct.is_some() {
            return direct;
        }

        let mut nearest: Option<(ActiveWord, f64)> = None;
        for (segment, seg) in candidates() {
            let Some(word) =
                active_word_index(&seg.words, seg.start_time, t - seg.start_time, &self.highlight)
            else {
                continue;
            };
            let timing = &seg.words[word];
            let distance = if t < timing.start {
                timing.start - t
            } else {
                (t - timing.end).max(0.0)
            };
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((ActiveWord { segment, word }, distance));
            }
        }
        nearest.map(|(active, _)| active)
    }

    /// Background scene at absolute time `t`. The last scene is held past the end.
    pub fn scene_at(&self, t: f64) -> Option<&Scene> {
        scene_index_at(&self.scenes, t).map(|i| &self.scenes[i])
    }

    /// Number of frames needed to cover the reconciled duration.
    pub fn frame_count(&self, fps: u32) -> u64 {
        if fps == 0 {
            return 0;
        }
        (self.duration.secs * fps as f64).ceil() as u64
    }

    /// Presentation time of frame `index`, never past the reconciled duration.
    pub fn frame_time(&self, index: u64, fps: u32) -> f64 {
        if fps == 0 {
            return 0.0;
        }
        (index as f64 / fps as f64).min(self.duration.secs)
    }

    pub fn frame_size(&self) -> (u32, u32) {
        self.aspect_ratio.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::PLACEHOLDER_RGB;
    use crate::timeline::duration::DurationOrigin;
    use crate::types::SceneAsset;

    fn plan() -> TimelinePlan {
        plan_from(vec![
            vec![
                WordTiming::native("Buy", 0.0, 0.3),
                WordTiming::native("now.", 0.4, 0.7),
            ],
            vec![WordTiming::native("Save", 1.0, 1.4)],
        ])
    }

    fn plan_from(groups: Vec<Vec<WordTiming>>) -> TimelinePlan {
        let segments: Vec<SubtitleSegment> = groups
            .into_iter()
            .filter_map(SubtitleSegment::from_words)
            .collect();
        let words = segments.iter().flat_map(|s| s.words.clone()).collect();
        TimelinePlan {
            session_id: "s".to_string(),
            duration: ReconciledDuration {
                secs: 2.0,
                origin: DurationOrigin::Measured,
                capped: false,
            },
            timing_source: TimingSource::Native,
            segments,
            words,
            scenes: vec![Scene {
                start_time: 0.0,
                end_time: 2.0,
                asset: SceneAsset::Placeholder,
            }],
            highlight: HighlightTolerance::default(),
            style: KaraokeStyle::default(),
            palette: KaraokeStyle::default().palette(),
            placeholder_rgb: PLACEHOLDER_RGB,
            aspect_ratio: AspectRatio::default(),
        }
    }

    #[test]
    fn active_word_resolves_segment_and_word() {
        let plan = plan();
        assert_eq!(plan.active_word_at(0.5), Some(ActiveWord { segment: 0, word: 1 }));
        assert_eq!(plan.active_word_at(1.2), Some(ActiveWord { segment: 1, word: 0 }));
        assert_eq!(plan.active_word_at(0.85), None);
        assert_eq!(plan.active_word_at(1.8), None);
    }

    #[test]
    fn last_word_stays_lit_past_segment_end() {
        let plan = plan();
        // "now." ends the first segment at 0.7.
        assert_eq!(plan.active_word_at(0.705), Some(ActiveWord { segment: 0, word: 1 }));
        assert_eq!(plan.active_word_at(0.74), Some(ActiveWord { segment: 0, word: 1 }));
    }

    #[test]
    fn next_segment_lights_up_within_gap_tolerance() {
        let plan = plan();
        // "Save" starts the second segment at 1.0.
        assert_eq!(plan.active_word_at(0.97), Some(ActiveWord { segment: 1, word: 0 }));
        assert_eq!(plan.active_word_at(0.94), None);
    }

    #[test]
    fn snap_across_segments_picks_nearest_word() {
        let plan = plan_from(vec![
            vec![WordTiming::native("a", 0.0, 1.0)],
            vec![WordTiming::native("b", 1.0625, 1.5)],
        ]);
        assert_eq!(plan.active_word_at(1.046875), Some(ActiveWord { segment: 1, word: 0 }));
        assert_eq!(plan.active_word_at(1.015625), Some(ActiveWord { segment: 0, word: 0 }));
    }

    #[test]
    fn direct_hit_beats_snap_in_earlier_segment() {
        let plan = plan_from(vec![
            vec![WordTiming::native("a", 0.0, 1.0)],
            vec![WordTiming::native("b", 1.03125, 1.5)],
        ]);
        assert_eq!(plan.active_word_at(1.03125), Some(ActiveWord { segment: 1, word: 0 }));
    }

    #[test]
    fn plan_carries_render_colours() {
        let plan = plan();
        assert_eq!(plan.palette, KaraokeStyle::Default.palette());
        assert_eq!(plan.placeholder_rgb, PLACEHOLDER_RGB);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["palette"]["highlight_rgb"], serde_json::json!([255, 215, 0]));
        assert_eq!(json["placeholder_rgb"], serde_json::json!([76, 205, 196]));
    }

    #[test]
    fn frames_cover_duration() {
        let plan = plan();
        assert_eq!(plan.frame_count(DEFAULT_FPS), 60);
        assert_eq!(plan.frame_time(30, DEFAULT_FPS), 1.0);
        assert_eq!(plan.frame_time(1_000, DEFAULT_FPS), 2.0);
        assert_eq!(plan.frame_count(0), 0);
    }

    #[test]
    fn scene_lookup_holds_final_frame() {
        let plan = plan();
        assert!(plan.scene_at(0.0).is_some());
        assert!(plan.scene_at(5.0).unwrap().asset.is_placeholder());
        assert_eq!(plan.frame_size(), (1080, 1920));
    }
}
