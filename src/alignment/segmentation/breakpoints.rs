use std::ops::Range;

use crate::types::WordTiming;

/// Conjunctions and clause openers; a group may close right after one.
const BREAK_WORDS: [&str; 25] = [
    "and", "but", "or", "so", "yet", "for", "nor", "because", "since", "while", "although",
    "though", "unless", "until", "when", "where", "if", "that", "which", "who", "what", "how",
    "then", "now", "here",
];

/// Discourse markers that usually carry a spoken pause.
const PAUSE_WORDS: [&str; 11] = [
    "also",
    "however",
    "therefore",
    "moreover",
    "furthermore",
    "meanwhile",
    "consequently",
    "nevertheless",
    "nonetheless",
    "otherwise",
    "instead",
];

fn normalized(word: &str) -> String {
    word.trim_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
        .to_lowercase()
}

/// True when a group may end after `words[index]`. `end` bounds the
/// look-ahead to the sentence being split.
pub(super) fn is_natural_breakpoint(words: &[WordTiming], index: usize, end: usize) -> bool {
    let raw = words[index].word.as_str();
    let word = normalized(raw);
    if BREAK_WORDS.contains(&word.as_str()) || PAUSE_WORDS.contains(&word.as_str()) {
        return true;
    }
    if raw.ends_with(',') {
        return true;
    }
    index + 1 < end && normalized(&words[index + 1].word) == "to"
}

/// Splits one sentence range into groups of at most `max_words` words.
///
/// Once a group holds `max_words - 2` words it closes at the first natural
/// breakpoint; a group that reaches `max_words` closes unconditionally.
pub(super) fn split_long_range(
    words: &[WordTiming],
    range: Range<usize>,
    max_words: usize,
) -> Vec<Range<usize>> {
    if range.len() <= max_words {
        return if range.is_empty() {
            Vec::new()
        } else {
            vec![range]
        };
    }

    let lookout_from = max_words.saturating_sub(2).max(1);
    let mut groups = Vec::with_capacity(range.len() / max_words + 1);
    let mut group_start = range.start;

    for index in range.clone() {
        let len = index + 1 - group_start;
        let should_break = len >= max_words
            || (len >= lookout_from && is_natural_breakpoint(words, index, range.end));
        if should_break {
            groups.push(group_start..index + 1);
            group_start = index + 1;
        }
    }
    if group_start < range.end {
        groups.push(group_start..range.end);
    }
    groups
}
