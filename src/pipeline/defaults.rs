use crate::alignment::normalize::word_timings_from_characters;
use crate::alignment::segmentation::plan_segments;
use crate::pipeline::traits::{SceneAllocator, SegmentPlanner, WordTimer};
use crate::timeline::scenes::allocate_scenes;
use crate::types::{CharacterTiming, Scene, SubtitleSegment, WordTiming};

pub struct CharacterWordTimer;

impl WordTimer for CharacterWordTimer {
    fn word_timings(&self, transcript: &str, characters: &[CharacterTiming]) -> Vec<WordTiming> {
        word_timings_from_characters(transcript, characters)
    }
}

pub struct SentenceSegmentPlanner;

impl SegmentPlanner for SentenceSegmentPlanner {
    fn plan_segments(
        &self,
        words: &[WordTiming],
        transcript: &str,
        max_words_per_group: usize,
    ) -> Vec<SubtitleSegment> {
        plan_segments(words, transcript, max_words_per_group)
    }
}

pub struct SequentialSceneAllocator;

impl SceneAllocator for SequentialSceneAllocator {
    fn allocate(
        &self,
        assets: &[String],
        duration_secs: f64,
        max_scene_secs: Option<f64>,
    ) -> Vec<Scene> {
        allocate_scenes(assets, duration_secs, max_scene_secs)
    }
}
