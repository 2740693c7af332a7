use serde::{Deserialize, Serialize};

/// Confidence attached to word timing derived from measured character data.
pub const NATIVE_CONFIDENCE: f32 = 1.0;
/// Confidence attached to heuristic word timing.
pub const ESTIMATED_CONFIDENCE: f32 = 0.5;

/// One grapheme of the narration transcript as timed by the speech provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterTiming {
    pub character: String,
    pub start: f64,
    pub end: f64,
}

impl CharacterTiming {
    pub fn new(character: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            character: character.into(),
            start,
            end,
        }
    }

    /// Empty graphemes are not whitespace, matching how providers pad missing entries.
    pub fn is_whitespace(&self) -> bool {
        !self.character.is_empty() && self.character.chars().all(char::is_whitespace)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    pub word: String,
    /// Seconds from the start of the narration.
    pub start: f64,
    /// Seconds from the start of the narration, `end >= start`.
    pub end: f64,
    /// 1.0 for measured timing, 0.5 for estimates.
    pub confidence: f32,
}

impl WordTiming {
    pub fn native(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
            confidence: NATIVE_CONFIDENCE,
        }
    }

    pub fn estimated(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
            confidence: ESTIMATED_CONFIDENCE,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_native(&self) -> bool {
        self.confidence >= NATIVE_CONFIDENCE
    }
}

/// Where a session's word timing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingSource {
    Native,
    Estimated,
}

impl TimingSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Estimated => "estimated",
        }
    }
}

/// A group of consecutive words displayed together as one subtitle slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleSegment {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    pub words: Vec<WordTiming>,
}

impl SubtitleSegment {
    /// Builds a segment whose bounds and text are derived from its words.
    /// Returns `None` for an empty group.
    pub fn from_words(words: Vec<WordTiming>) -> Option<Self> {
        let start_time = words.first()?.start;
        let end_time = words.iter().map(|w| w.end).fold(start_time, f64::max);
        let text = words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Some(Self {
            text,
            start_time,
            end_time,
            words,
        })
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "uri", rename_all = "lowercase")]
pub enum SceneAsset {
    /// A background image or other external visual resource.
    Image(String),
    /// Synthetic solid-colour background used when no assets exist.
    Placeholder,
}

impl SceneAsset {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Span of the video assigned to one background asset, `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub start_time: f64,
    pub end_time: f64,
    pub asset: SceneAsset,
}

impl Scene {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Everything the pipeline consumes for one video-generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrationInput {
    /// Exact transcript sent to the speech provider.
    pub transcript: String,
    /// Provider character timing; `None` or empty selects the estimator.
    #[serde(default)]
    pub character_timings: Option<Vec<CharacterTiming>>,
    /// Length of the synthesized narration audio, if known.
    #[serde(default)]
    pub measured_duration: Option<f64>,
    /// Script-specified target length.
    #[serde(default)]
    pub authored_duration: Option<f64>,
    /// Ordered background asset references.
    #[serde(default)]
    pub assets: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_classification() {
        assert!(CharacterTiming::new(" ", 0.0, 0.1).is_whitespace());
        assert!(CharacterTiming::new("\n", 0.0, 0.1).is_whitespace());
        assert!(!CharacterTiming::new("a", 0.0, 0.1).is_whitespace());
        assert!(!CharacterTiming::new("", 0.0, 0.1).is_whitespace());
    }

    #[test]
    fn segment_from_words_derives_bounds_and_text() {
        let seg = SubtitleSegment::from_words(vec![
            WordTiming::native("Buy", 0.0, 0.3),
            WordTiming::native("now", 0.4, 0.7),
        ])
        .expect("non-empty");
        assert_eq!(seg.text, "Buy now");
        assert_eq!(seg.start_time, 0.0);
        assert_eq!(seg.end_time, 0.7);
        assert!(SubtitleSegment::from_words(Vec::new()).is_none());
    }

    #[test]
    fn scene_asset_serializes_with_kind_tag() {
        let json = serde_json::to_string(&SceneAsset::Image("a.png".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"image","uri":"a.png"}"#);
        let json = serde_json::to_string(&SceneAsset::Placeholder).unwrap();
        assert_eq!(json, r#"{"kind":"placeholder"}"#);
    }

    #[test]
    fn narration_input_defaults_optional_fields() {
        let input: NarrationInput = serde_json::from_str(r#"{"transcript": "Hi there"}"#).unwrap();
        assert!(input.character_timings.is_none());
        assert!(input.measured_duration.is_none());
        assert!(input.assets.is_empty());
    }
}
