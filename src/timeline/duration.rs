use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::types::{SubtitleSegment, WordTiming};

/// Duration signals available for one session, in descending priority.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationSources {
    /// Length of the completed narration audio.
    pub measured: Option<f64>,
    /// Script-specified target length.
    pub authored: Option<f64>,
    /// Platform-enforced maximum.
    pub hard_cap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationOrigin {
    Measured,
    Authored,
    Fallback,
}

impl DurationOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Measured => "measured",
            Self::Authored => "authored",
            Self::Fallback => "fallback",
        }
    }
}

/// The single authoritative clip length every track must match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReconciledDuration {
    pub secs: f64,
    pub origin: DurationOrigin,
    /// True when the chosen source exceeded the hard cap and was clamped to it.
    pub capped: bool,
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Resolves the clip duration from the available sources.
///
/// Measured beats authored beats `fallback_secs`. A usable hard cap bounds the
/// result; an unusable cap leaves it unbounded. Fails only when the measured,
/// authored and cap values are all unusable.
pub fn reconcile_duration(
    sources: DurationSources,
    fallback_secs: f64,
) -> Result<ReconciledDuration, TimelineError> {
    let measured = usable(sources.measured);
    let authored = usable(sources.authored);
    let hard_cap = usable(Some(sources.hard_cap));

    if measured.is_none() && authored.is_none() && hard_cap.is_none() {
        return Err(TimelineError::NoValidDuration {
            measured: sources.measured,
            authored: sources.authored,
            hard_cap: sources.hard_cap,
        });
    }

    let (mut secs, origin) = match (measured, authored, usable(Some(fallback_secs))) {
        (Some(m), _, _) => (m, DurationOrigin::Measured),
        (None, Some(a), _) => (a, DurationOrigin::Authored),
        (None, None, Some(f)) => (f, DurationOrigin::Fallback),
        (None, None, None) => (
            hard_cap.unwrap_or(crate::config::TimelineConfig::DEFAULT_FALLBACK_DURATION_SECS),
            DurationOrigin::Fallback,
        ),
    };
    if origin == DurationOrigin::Fallback {
        tracing::warn!(
            measured = ?sources.measured,
            authored = ?sources.authored,
            fallback_secs = secs,
            "duration: no usable measured or authored duration, using fallback"
        );
    }

    let mut capped = false;
    match hard_cap {
        Some(cap) if secs > cap => {
            tracing::warn!(
                duration_secs = format!("{secs:.3}"),
                hard_cap_secs = cap,
                "duration: exceeds hard cap, clamping"
            );
            secs = cap;
            capped = true;
        }
        Some(_) => {}
        None => tracing::warn!(
            hard_cap_secs = sources.hard_cap,
            "duration: hard cap unusable, leaving duration unbounded"
        ),
    }

    tracing::info!(
        duration_secs = format!("{secs:.3}"),
        origin = origin.as_str(),
        capped,
        "duration: reconciled"
    );
    Ok(ReconciledDuration {
        secs,
        origin,
        capped,
    })
}

/// Applies the boundary rule at `limit`: words starting at or after it are
/// removed, words straddling it end exactly at it. Idempotent. Returns the
/// number of words removed.
pub fn clamp_words(words: &mut Vec<WordTiming>, limit: f64) -> usize {
    let before = words.len();
    words.retain(|w| {
        let keep = w.start < limit;
        if !keep {
            tracing::debug!(word = w.word.as_str(), start = w.start, limit, "duration: word removed");
        }
        keep
    });
    for word in words.iter_mut() {
        if word.end > limit {
            tracing::debug!(word = word.word.as_str(), end = word.end, limit, "duration: word end clamped");
            word.end = limit;
        }
    }
    before - words.len()
}

/// Applies [`clamp_words`] to every segment, dropping segments left empty and
/// recomputing the bounds and text of the rest.
pub fn clamp_segments(segments: &mut Vec<SubtitleSegment>, limit: f64) {
    let taken = std::mem::take(segments);
    *segments = taken
        .into_iter()
        .filter_map(|mut segment| {
            clamp_words(&mut segment.words, limit);
            SubtitleSegment::from_words(segment.words)
        })
        .collect();
}

/// Trims word and segment timing to a reconciled duration with the
/// [`clamp_words`] rule. Timing that already fits is left untouched.
pub fn trim_to_duration(
    duration: &ReconciledDuration,
    words: &mut Vec<WordTiming>,
    segments: &mut Vec<SubtitleSegment>,
) {
    let removed = clamp_words(words, duration.secs);
    clamp_segments(segments, duration.secs);
    if removed > 0 || duration.capped {
        tracing::info!(
            removed_words = removed,
            remaining_words = words.len(),
            remaining_segments = segments.len(),
            limit_secs = duration.secs,
            capped = duration.capped,
            "duration: trimmed timing to reconciled duration"
        );
    }
}
