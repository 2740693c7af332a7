use crate::types::{CharacterTiming, WordTiming};

/// Converts provider character timing into word timing.
///
/// The transcript is split on whitespace and walked in lockstep with the
/// character stream. Whitespace entries between words are skipped, then each
/// word consumes exactly as many entries as it has characters. A character
/// stream that ends early yields only the words it reaches; a word cut off
/// mid-way keeps the timing of the characters that were delivered.
pub fn word_timings_from_characters(
    transcript: &str,
    characters: &[CharacterTiming],
) -> Vec<WordTiming> {
    if characters.is_empty() {
        return Vec::new();
    }

    let expected_words = transcript.split_whitespace().count();
    let mut out = Vec::with_capacity(expected_words);
    let mut cursor = 0usize;

    for word in transcript.split_whitespace() {
        while characters
            .get(cursor)
            .is_some_and(CharacterTiming::is_whitespace)
        {
            cursor += 1;
        }
        if cursor >= characters.len() {
            break;
        }

        let wanted = word.chars().count();
        let first = cursor;
        let last = (cursor + wanted).min(characters.len()) - 1;
        if last + 1 - first < wanted {
            tracing::warn!(
                word,
                wanted_chars = wanted,
                available_chars = last + 1 - first,
                "normalize: character timing truncated inside word"
            );
        }

        let start = characters[first].start;
        let end = characters[last].end.max(start);
        tracing::debug!(
            word,
            first_char = first,
            last_char = last,
            start = format!("{start:.3}"),
            end = format!("{end:.3}"),
            "normalize: word boundary"
        );
        out.push(WordTiming::native(word, start, end));
        cursor = last + 1;
    }

    if out.len() < expected_words {
        tracing::warn!(
            aligned_words = out.len(),
            expected_words,
            character_count = characters.len(),
            "normalize: provider timing shorter than transcript; trailing words left untimed"
        );
    }

    out
}
