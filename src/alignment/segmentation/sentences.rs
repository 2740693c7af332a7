use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::WordTiming;

fn sentence_end_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("valid sentence-end pattern"))
}

/// Character offsets just past each sentence terminator (and the whitespace
/// that follows it).
pub(super) fn sentence_end_offsets(text: &str) -> Vec<usize> {
    sentence_end_pattern()
        .find_iter(text)
        .map(|m| text[..m.end()].chars().count())
        .collect()
}

/// Maps sentence ends onto word index ranges.
///
/// The text position of each word is approximated by summing word lengths
/// plus one separator per word. The estimate only steers grouping; it never
/// touches timing. Words past the last terminator form a trailing range.
pub(super) fn sentence_word_ranges(words: &[WordTiming], ends: &[usize]) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(ends.len() + 1);
    let mut char_pos = 0usize;
    let mut word_index = 0usize;

    for &end in ends {
        let first = word_index;
        while word_index < words.len() {
            char_pos += words[word_index].word.chars().count() + 1;
            word_index += 1;
            if char_pos >= end {
                break;
            }
        }
        if word_index > first {
            ranges.push(first..word_index);
        }
    }

    if word_index < words.len() {
        ranges.push(word_index..words.len());
    }
    ranges
}
