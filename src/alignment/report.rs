use serde::Serialize;

use crate::error::TimelineError;
use crate::timeline::TimelinePlan;
use crate::types::{Scene, SubtitleSegment, WordTiming};

const SCHEMA_VERSION: u32 = 1;
/// Allowed disagreement between scene coverage and the reconciled duration.
const COVERAGE_EPS_SEC: f64 = 0.001;

#[derive(Debug, Clone, Serialize)]
pub struct TimelineReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub structural: StructuralMetrics,
    pub segments: SegmentMetrics,
    pub scenes: SceneMetrics,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub session_id: String,
    pub timing_source: String,
    pub duration_secs: f64,
    pub duration_origin: String,
    pub capped: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StructuralMetrics {
    pub word_count: u32,
    pub native_word_count: u32,
    pub negative_duration_word_count: u32,
    pub overlap_word_count: u32,
    pub non_monotonic_word_count: u32,
    pub words_past_duration: u32,
    pub gap_ratio: f32,
    pub overlap_ratio: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentMetrics {
    pub count: u32,
    pub min_words: u32,
    pub max_words: u32,
    pub mean_words: f32,
    pub words_in_segments: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneMetrics {
    pub count: u32,
    pub placeholder: bool,
    pub coverage_error_secs: f64,
    pub gap_count: u32,
}

pub fn compute_report(
    plan: &TimelinePlan,
    generated_at: String,
) -> Result<TimelineReport, TimelineError> {
    let duration = plan.duration_secs();
    let structural = compute_structural_metrics(&plan.words, duration)?;
    let segments = compute_segment_metrics(&plan.segments)?;
    let scenes = compute_scene_metrics(&plan.scenes, duration);

    let mut notes = Vec::new();
    if structural.native_word_count < structural.word_count {
        notes.push(format!(
            "{} of {} words use estimated timing",
            structural.word_count - structural.native_word_count,
            structural.word_count
        ));
    }
    if segments.words_in_segments != structural.word_count {
        notes.push(format!(
            "segments hold {} words but the plan has {}",
            segments.words_in_segments, structural.word_count
        ));
    }
    if scenes.coverage_error_secs > COVERAGE_EPS_SEC {
        notes.push(format!(
            "scene coverage off by {:.4}s",
            scenes.coverage_error_secs
        ));
    }
    if plan.duration.capped {
        notes.push(format!("duration clamped to hard cap {:.3}s", duration));
    }

    Ok(TimelineReport {
        schema_version: SCHEMA_VERSION,
        meta: Meta {
            generated_at,
            session_id: plan.session_id.clone(),
            timing_source: plan.timing_source.as_str().to_string(),
            duration_secs: duration,
            duration_origin: plan.duration.origin.as_str().to_string(),
            capped: plan.duration.capped,
        },
        structural,
        segments,
        scenes,
        notes,
    })
}

fn compute_structural_metrics(
    words: &[WordTiming],
    duration_secs: f64,
) -> Result<StructuralMetrics, TimelineError> {
    let negative_duration_word_count = words.iter().filter(|w| w.end < w.start).count();
    let native_word_count = words.iter().filter(|w| w.is_native()).count();
    let words_past_duration = words.iter().filter(|w| w.end > duration_secs).count();

    let mut overlap_word_count = 0usize;
    let mut non_monotonic_word_count = 0usize;
    let mut gap_secs = 0.0f64;
    let mut overlap_secs = 0.0f64;

    for pair in words.windows(2) {
        let current = &pair[0];
        let next = &pair[1];

        if current.end > next.start {
            overlap_word_count += 1;
            overlap_secs += current.end - next.start;
        } else {
            gap_secs += next.start - current.end;
        }

        if current.start > next.start {
            non_monotonic_word_count += 1;
        }
    }

    let gap_ratio = if duration_secs > 0.0 {
        gap_secs / duration_secs
    } else {
        0.0
    };
    let overlap_ratio = if duration_secs > 0.0 {
        overlap_secs / duration_secs
    } else {
        0.0
    };

    Ok(StructuralMetrics {
        word_count: to_u32(words.len()),
        native_word_count: to_u32(native_word_count),
        negative_duration_word_count: to_u32(negative_duration_word_count),
        overlap_word_count: to_u32(overlap_word_count),
        non_monotonic_word_count: to_u32(non_monotonic_word_count),
        words_past_duration: to_u32(words_past_duration),
        gap_ratio: checked_f32(gap_ratio, "structural.gap_ratio")?,
        overlap_ratio: checked_f32(overlap_ratio, "structural.overlap_ratio")?,
    })
}

fn compute_segment_metrics(segments: &[SubtitleSegment]) -> Result<SegmentMetrics, TimelineError> {
    let sizes: Vec<usize> = segments.iter().map(|s| s.words.len()).collect();
    let total: usize = sizes.iter().sum();
    let mean = if sizes.is_empty() {
        0.0
    } else {
        total as f64 / sizes.len() as f64
    };
    Ok(SegmentMetrics {
        count: to_u32(sizes.len()),
        min_words: to_u32(sizes.iter().copied().min().unwrap_or(0)),
        max_words: to_u32(sizes.iter().copied().max().unwrap_or(0)),
        mean_words: checked_f32(mean, "segments.mean_words")?,
        words_in_segments: to_u32(total),
    })
}

fn compute_scene_metrics(scenes: &[Scene], duration_secs: f64) -> SceneMetrics {
    let covered: f64 = scenes.iter().map(Scene::duration).sum();
    let gap_count = scenes
        .windows(2)
        .filter(|pair| (pair[1].start_time - pair[0].end_time).abs() > f64::EPSILON)
        .count();
    SceneMetrics {
        count: to_u32(scenes.len()),
        placeholder: scenes.iter().any(|s| s.asset.is_placeholder()),
        coverage_error_secs: (covered - duration_secs).abs(),
        gap_count: to_u32(gap_count),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn checked_f32(value: f64, metric_name: &str) -> Result<f32, TimelineError> {
    if !value.is_finite() {
        return Err(TimelineError::invalid_input(format!(
            "metric '{metric_name}' is not finite: {value}"
        )));
    }
    Ok(value as f32)
}
