use std::ops::Range;

use crate::types::{SubtitleSegment, WordTiming};

mod breakpoints;
mod sentences;

/// Partitions `words` into display groups along sentence and phrase
/// boundaries, at most `max_words_per_group` words each.
///
/// The returned ranges are contiguous, ordered, non-empty and cover
/// `0..words.len()` exactly. A `max_words_per_group` of zero is treated as one.
pub fn plan_word_groups(
    words: &[WordTiming],
    text: &str,
    max_words_per_group: usize,
) -> Vec<Range<usize>> {
    if words.is_empty() {
        return Vec::new();
    }
    let max_words = max_words_per_group.max(1);

    let ends = sentences::sentence_end_offsets(text);
    let sentence_ranges = if ends.is_empty() {
        vec![0..words.len()]
    } else {
        sentences::sentence_word_ranges(words, &ends)
    };

    let groups: Vec<Range<usize>> = sentence_ranges
        .into_iter()
        .flat_map(|range| breakpoints::split_long_range(words, range, max_words))
        .collect();

    debug_assert!(
        covers_exactly(&groups, words.len()),
        "segmentation completeness contract violated"
    );
    tracing::debug!(
        word_count = words.len(),
        sentence_count = ends.len(),
        group_count = groups.len(),
        max_words,
        "segmentation: planned word groups"
    );
    groups
}

/// Builds subtitle segments from [`plan_word_groups`].
pub fn plan_segments(
    words: &[WordTiming],
    text: &str,
    max_words_per_group: usize,
) -> Vec<SubtitleSegment> {
    plan_word_groups(words, text, max_words_per_group)
        .into_iter()
        .filter_map(|range| {
            let segment = SubtitleSegment::from_words(words[range].to_vec())?;
            tracing::debug!(
                text = segment.text.as_str(),
                start = format!("{:.3}", segment.start_time),
                end = format!("{:.3}", segment.end_time),
                "segmentation: segment"
            );
            Some(segment)
        })
        .collect()
}

fn covers_exactly(groups: &[Range<usize>], len: usize) -> bool {
    let mut next = 0usize;
    for group in groups {
        if group.start != next || group.is_empty() {
            return false;
        }
        next = group.end;
    }
    next == len
}
