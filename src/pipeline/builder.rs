use std::path::Path;

use crate::config::TimelineConfig;
use crate::error::TimelineError;
use crate::pipeline::defaults::{
    CharacterWordTimer, SentenceSegmentPlanner, SequentialSceneAllocator,
};
use crate::pipeline::runtime::{TimelineEngine, TimelineEngineParts};
use crate::pipeline::traits::{SceneAllocator, SegmentPlanner, WordTimer};

pub struct TimelineBuilder {
    config: TimelineConfig,
    word_timer: Option<Box<dyn WordTimer>>,
    segment_planner: Option<Box<dyn SegmentPlanner>>,
    scene_allocator: Option<Box<dyn SceneAllocator>>,
}

impl TimelineBuilder {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            word_timer: None,
            segment_planner: None,
            scene_allocator: None,
        }
    }

    pub fn from_config_file(path: &Path) -> Result<Self, TimelineError> {
        Ok(Self::new(TimelineConfig::load(path)?))
    }

    pub fn with_word_timer(mut self, word_timer: Box<dyn WordTimer>) -> Self {
        self.word_timer = Some(word_timer);
        self
    }

    pub fn with_segment_planner(mut self, segment_planner: Box<dyn SegmentPlanner>) -> Self {
        self.segment_planner = Some(segment_planner);
        self
    }

    pub fn with_scene_allocator(mut self, scene_allocator: Box<dyn SceneAllocator>) -> Self {
        self.scene_allocator = Some(scene_allocator);
        self
    }

    pub fn build(self) -> Result<TimelineEngine, TimelineError> {
        self.config.validate()?;
        Ok(TimelineEngine::from_parts(TimelineEngineParts {
            config: self.config,
            word_timer: self
                .word_timer
                .unwrap_or_else(|| Box::new(CharacterWordTimer)),
            segment_planner: self
                .segment_planner
                .unwrap_or_else(|| Box::new(SentenceSegmentPlanner)),
            scene_allocator: self
                .scene_allocator
                .unwrap_or_else(|| Box::new(SequentialSceneAllocator)),
        }))
    }
}
