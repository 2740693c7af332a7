use crate::config::HighlightTolerance;
use crate::types::{SubtitleSegment, WordTiming};

/// Index of the word to highlight at time `t`, or `None` between words.
///
/// `t` and word timing are compared after shifting word timing by `origin`,
/// so a segment-relative render time is answered with `origin` set to the
/// segment start. Word `i` is active when `start <= t <= end + forward`;
/// the first such word wins. Otherwise, if `t` lies within `gap` of some
/// word's boundary, the nearest such word is returned (earlier word on ties).
///
/// Pure: the result depends only on the arguments.
pub fn active_word_index(
    words: &[WordTiming],
    origin: f64,
    t: f64,
    tolerance: &HighlightTolerance,
) -> Option<usize> {
    if !t.is_finite() {
        return None;
    }

    let direct = words.iter().position(|w| {
        let start = w.start - origin;
        let end = w.end - origin;
        start <= t && t <= end + tolerance.forward_tolerance_secs
    });
    if direct.is_some() {
        return direct;
    }

    let mut nearest: Option<(usize, f64)> = None;
    for (i, w) in words.iter().enumerate() {
        let start = w.start - origin;
        let end = w.end - origin;
        let distance = if t < start { start - t } else { t - end };
        if distance > tolerance.gap_tolerance_secs {
            continue;
        }
        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((i, distance));
        }
    }
    nearest.map(|(i, _)| i)
}

impl SubtitleSegment {
    /// Highlighted word for a render time measured from the segment start.
    pub fn active_word(&self, t_relative: f64, tolerance: &HighlightTolerance) -> Option<usize> {
        active_word_index(&self.words, self.start_time, t_relative, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<WordTiming> {
        vec![
            WordTiming::native("Buy", 0.0, 0.3),
            WordTiming::native("now", 0.4, 0.7),
            WordTiming::native("and", 0.8, 1.1),
        ]
    }

    fn tol() -> HighlightTolerance {
        HighlightTolerance::default()
    }

    #[test]
    fn inside_word_is_active() {
        let w = words();
        assert_eq!(active_word_index(&w, 0.0, 0.0, &tol()), Some(0));
        assert_eq!(active_word_index(&w, 0.0, 0.15, &tol()), Some(0));
        assert_eq!(active_word_index(&w, 0.0, 0.55, &tol()), Some(1));
        assert_eq!(active_word_index(&w, 0.0, 1.1, &tol()), Some(2));
    }

    #[test]
    fn forward_tolerance_extends_word_end() {
        let w = words();
        assert_eq!(active_word_index(&w, 0.0, 0.305, &tol()), Some(0));
    }

    #[test]
    fn gap_snaps_to_nearest_word() {
        let w = words();
        // 0.34 is 0.04 after "Buy" and 0.06 before "now".
        assert_eq!(active_word_index(&w, 0.0, 0.34, &tol()), Some(0));
        // 0.37 is 0.07 after "Buy" and 0.03 before "now".
        assert_eq!(active_word_index(&w, 0.0, 0.37, &tol()), Some(1));
    }

    #[test]
    fn tie_goes_to_earlier_word() {
        let w = vec![
            WordTiming::native("a", 0.0, 1.0),
            WordTiming::native("b", 1.0625, 2.0),
        ];
        assert_eq!(active_word_index(&w, 0.0, 1.03125, &tol()), Some(0));
    }

    #[test]
    fn far_from_words_is_none() {
        let w = vec![
            WordTiming::native("a", 0.0, 1.0),
            WordTiming::native("b", 2.0, 3.0),
        ];
        assert_eq!(active_word_index(&w, 0.0, 1.5, &tol()), None);
        assert_eq!(active_word_index(&w, 0.0, -0.5, &tol()), None);
        assert_eq!(active_word_index(&w, 0.0, 3.5, &tol()), None);
        assert_eq!(active_word_index(&[], 0.0, 0.0, &tol()), None);
        assert_eq!(active_word_index(&w, 0.0, f64::NAN, &tol()), None);
    }

    #[test]
    fn just_before_first_word_snaps_within_gap_tolerance() {
        let w = vec![WordTiming::native("a", 1.0, 2.0)];
        assert_eq!(active_word_index(&w, 0.0, 0.97, &tol()), Some(0));
        assert_eq!(active_word_index(&w, 0.0, 0.9, &tol()), None);
    }

    #[test]
    fn overlapping_words_prefer_earlier() {
        let w = vec![
            WordTiming::native("a", 0.0, 1.05),
            WordTiming::native("b", 1.0, 2.0),
        ];
        assert_eq!(active_word_index(&w, 0.0, 1.02, &tol()), Some(0));
        assert_eq!(active_word_index(&w, 0.0, 1.2, &tol()), Some(1));
    }

    #[test]
    fn segment_relative_time_is_shifted_by_segment_start() {
        let segment = SubtitleSegment::from_words(vec![
            WordTiming::native("Save", 10.0, 10.4),
            WordTiming::native("big", 10.5, 10.8),
        ])
        .unwrap();
        assert_eq!(segment.active_word(0.0, &tol()), Some(0));
        assert_eq!(segment.active_word(0.6, &tol()), Some(1));
        assert_eq!(segment.active_word(2.0, &tol()), None);
    }

    #[test]
    fn repeated_queries_agree() {
        let w = words();
        let samples: Vec<f64> = (0..240).map(|i| i as f64 / 200.0).collect();
        let first: Vec<_> = samples
            .iter()
            .map(|&t| active_word_index(&w, 0.0, t, &tol()))
            .collect();
        let second: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = samples
                .iter()
                .map(|&t| {
                    let w = &w;
                    scope.spawn(move || active_word_index(w, 0.0, t, &tol()))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(first, second);
    }
}
