use crate::types::{CharacterTiming, Scene, SubtitleSegment, WordTiming};

pub trait WordTimer: Send + Sync {
    fn word_timings(&self, transcript: &str, characters: &[CharacterTiming]) -> Vec<WordTiming>;
}

pub trait SegmentPlanner: Send + Sync {
    fn plan_segments(
        &self,
        words: &[WordTiming],
        transcript: &str,
        max_words_per_group: usize,
    ) -> Vec<SubtitleSegment>;
}

pub trait SceneAllocator: Send + Sync {
    fn allocate(
        &self,
        assets: &[String],
        duration_secs: f64,
        max_scene_secs: Option<f64>,
    ) -> Vec<Scene>;
}
