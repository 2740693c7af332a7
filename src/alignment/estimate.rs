use crate::config::EstimatorConfig;
use crate::types::WordTiming;

/// Approximates word timing from text length alone.
///
/// Words are laid out back to back from t=0; each lasts
/// `chars * char_rate_secs + base_offset_secs`, followed by `word_gap_secs`.
pub fn estimate_word_timings(text: &str, config: &EstimatorConfig) -> Vec<WordTiming> {
    let mut cursor = 0.0f64;
    text.split_whitespace()
        .map(|word| {
            let duration =
                word.chars().count() as f64 * config.char_rate_secs + config.base_offset_secs;
            let timing = WordTiming::estimated(word, cursor, cursor + duration);
            cursor = timing.end + config.word_gap_secs;
            timing
        })
        .collect()
}
