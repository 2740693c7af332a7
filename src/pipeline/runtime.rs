use crate::alignment::estimate::estimate_word_timings;
use crate::config::TimelineConfig;
use crate::error::TimelineError;
use crate::pipeline::traits::{SceneAllocator, SegmentPlanner, WordTimer};
use crate::presets::PLACEHOLDER_RGB;
use crate::session::SessionContext;
use crate::timeline::duration::{reconcile_duration, trim_to_duration, DurationSources};
use crate::timeline::TimelinePlan;
use crate::types::{CharacterTiming, NarrationInput, TimingSource};

/// Turns narration timing into the subtitle and scene schedules.
///
/// Holds no per-session state; one engine serves any number of sessions.
pub struct TimelineEngine {
    config: TimelineConfig,
    word_timer: Box<dyn WordTimer>,
    segment_planner: Box<dyn SegmentPlanner>,
    scene_allocator: Box<dyn SceneAllocator>,
}

pub(crate) struct TimelineEngineParts {
    pub config: TimelineConfig,
    pub word_timer: Box<dyn WordTimer>,
    pub segment_planner: Box<dyn SegmentPlanner>,
    pub scene_allocator: Box<dyn SceneAllocator>,
}

impl TimelineEngine {
    pub(crate) fn from_parts(parts: TimelineEngineParts) -> Self {
        Self {
            config: parts.config,
            word_timer: parts.word_timer,
            segment_planner: parts.segment_planner,
            scene_allocator: parts.scene_allocator,
        }
    }

    /// Runs normalization (or estimation), segmentation, duration
    /// reconciliation and scene allocation for one session.
    ///
    /// The reconciled duration is attached to `session`; planning the same
    /// session twice reuses the first duration. Fails only when no duration
    /// source is usable.
    pub fn plan(
        &self,
        session: &SessionContext,
        input: &NarrationInput,
    ) -> Result<TimelinePlan, TimelineError> {
        let characters = input.character_timings.as_deref().unwrap_or(&[]);
        let (mut words, timing_source) = if characters.is_empty() {
            let words = estimate_word_timings(&input.transcript, &self.config.estimator);
            tracing::warn!(
                session_id = session.id(),
                word_count = words.len(),
                timing_source = TimingSource::Estimated.as_str(),
                "pipeline: no provider character timing, estimating word timing"
            );
            (words, TimingSource::Estimated)
        } else {
            let words = self.word_timer.word_timings(&input.transcript, characters);
            tracing::info!(
                session_id = session.id(),
                word_count = words.len(),
                character_count = characters.len(),
                timing_source = TimingSource::Native.as_str(),
                "pipeline: normalized provider timing"
            );
            (words, TimingSource::Native)
        };

        let mut segments = self.segment_planner.plan_segments(
            &words,
            &input.transcript,
            self.config.max_words_per_group,
        );

        let measured = input
            .measured_duration
            .or_else(|| narration_end(characters));
        let reconciled = reconcile_duration(
            DurationSources {
                measured,
                authored: input.authored_duration,
                hard_cap: self.config.hard_cap_secs,
            },
            self.config.fallback_duration_secs,
        )?;
        let duration = session.attach_duration(reconciled);
        trim_to_duration(&duration, &mut words, &mut segments);

        let scenes = self.scene_allocator.allocate(
            &input.assets,
            duration.secs,
            self.config.max_scene_secs,
        );

        tracing::info!(
            session_id = session.id(),
            duration_secs = format!("{:.3}", duration.secs),
            word_count = words.len(),
            segment_count = segments.len(),
            scene_count = scenes.len(),
            "pipeline: timeline planned"
        );

        Ok(TimelinePlan {
            session_id: session.id().to_string(),
            duration,
            timing_source,
            words,
            segments,
            scenes,
            highlight: self.config.highlight,
            style: self.config.style,
            palette: self.config.style.palette(),
            placeholder_rgb: PLACEHOLDER_RGB,
            aspect_ratio: self.config.aspect_ratio,
        })
    }
}

/// Latest character end time, the narration length implied by provider timing.
fn narration_end(characters: &[CharacterTiming]) -> Option<f64> {
    characters
        .iter()
        .map(|c| c.end)
        .filter(|end| end.is_finite())
        .reduce(f64::max)
}
