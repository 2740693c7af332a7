use crate::types::SubtitleSegment;

/// Renders segments as SubRip cues, numbered from 1.
pub fn render(segments: &[SubtitleSegment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            timestamp(segment.start_time),
            timestamp(segment.end_time),
            segment.text
        ));
    }
    out
}

/// `HH:MM:SS,mmm`, milliseconds truncated.
pub fn timestamp(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0 + 1e-6).floor() as u64
    } else {
        0
    };
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60,
        ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WordTiming;

    #[test]
    fn timestamp_formats_hours_minutes_seconds_millis() {
        assert_eq!(timestamp(0.0), "00:00:00,000");
        assert_eq!(timestamp(1.5), "00:00:01,500");
        assert_eq!(timestamp(61.25), "00:01:01,250");
        assert_eq!(timestamp(3723.0009), "01:02:03,000");
        assert_eq!(timestamp(-2.0), "00:00:00,000");
    }

    #[test]
    fn timestamp_does_not_lose_a_millisecond_to_rounding() {
        assert_eq!(timestamp(0.3), "00:00:00,300");
        assert_eq!(timestamp(1.1), "00:00:01,100");
    }

    #[test]
    fn render_numbers_cues() {
        let segments = vec![
            SubtitleSegment::from_words(vec![WordTiming::native("Buy", 0.0, 0.3)]).unwrap(),
            SubtitleSegment::from_words(vec![WordTiming::native("now", 0.4, 0.7)]).unwrap(),
        ];
        let srt = render(&segments);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:00,300\nBuy\n\n2\n00:00:00,400 --> 00:00:00,700\nnow\n\n"
        );
    }

    #[test]
    fn render_empty_is_empty() {
        assert_eq!(render(&[]), "");
    }
}
