//! Named rendering and narration presets.
//!
//! Each preset family is a closed set. Lookups by name fall back to the
//! family's default instead of failing, so an unknown name coming from a
//! request never aborts generation.

use serde::{Deserialize, Serialize};

/// Background colour of the synthetic placeholder scene.
pub const PLACEHOLDER_RGB: [u8; 3] = [76, 205, 196];

/// Highlight palette for karaoke subtitles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KaraokeStyle {
    #[default]
    Default,
    Energetic,
    Professional,
    Warm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KaraokePalette {
    pub highlight_rgb: [u8; 3],
    /// RGBA backing behind the subtitle text.
    pub backing_rgba: [u8; 4],
}

impl KaraokeStyle {
    pub const ALL: [KaraokeStyle; 4] = [
        KaraokeStyle::Default,
        KaraokeStyle::Energetic,
        KaraokeStyle::Professional,
        KaraokeStyle::Warm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Energetic => "energetic",
            Self::Professional => "professional",
            Self::Warm => "warm",
        }
    }

    pub fn from_name(name: &str) -> Self {
        lookup(&Self::ALL, name, Self::as_str).unwrap_or_else(|| {
            tracing::debug!(name, "presets: unknown karaoke style, using default");
            Self::default()
        })
    }

    pub fn palette(self) -> KaraokePalette {
        match self {
            Self::Default => KaraokePalette {
                highlight_rgb: [0xFF, 0xD7, 0x00],
                backing_rgba: [0, 0, 0, 178],
            },
            Self::Energetic => KaraokePalette {
                highlight_rgb: [0xFF, 0x57, 0x22],
                backing_rgba: [0, 0, 0, 204],
            },
            Self::Professional => KaraokePalette {
                highlight_rgb: [0x21, 0x96, 0xF3],
                backing_rgba: [0, 0, 0, 153],
            },
            Self::Warm => KaraokePalette {
                highlight_rgb: [0xFF, 0x98, 0x00],
                backing_rgba: [0, 0, 0, 128],
            },
        }
    }
}

/// Delivery tone requested from the speech provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceTone {
    #[default]
    Energetic,
    Exciting,
    Announcer,
    Professional,
    Warm,
    Casual,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub speed: f32,
}

impl VoiceTone {
    pub const ALL: [VoiceTone; 6] = [
        VoiceTone::Energetic,
        VoiceTone::Exciting,
        VoiceTone::Announcer,
        VoiceTone::Professional,
        VoiceTone::Warm,
        VoiceTone::Casual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Energetic => "energetic",
            Self::Exciting => "exciting",
            Self::Announcer => "announcer",
            Self::Professional => "professional",
            Self::Warm => "warm",
            Self::Casual => "casual",
        }
    }

    pub fn from_name(name: &str) -> Self {
        lookup(&Self::ALL, name, Self::as_str).unwrap_or_else(|| {
            tracing::debug!(name, "presets: unknown voice tone, using default");
            Self::default()
        })
    }

    pub fn settings(self) -> VoiceSettings {
        let (stability, similarity_boost, speed) = match self {
            Self::Energetic => (0.3, 0.7, 1.1),
            Self::Exciting => (0.2, 0.8, 1.1),
            Self::Announcer => (0.4, 0.6, 1.1),
            Self::Professional => (0.6, 0.5, 1.0),
            Self::Warm => (0.5, 0.6, 1.1),
            Self::Casual => (0.4, 0.6, 1.1),
        };
        VoiceSettings {
            stability,
            similarity_boost,
            speed,
        }
    }
}

/// Output frame geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Landscape16x9,
    #[default]
    #[serde(rename = "9:16")]
    Portrait9x16,
    #[serde(rename = "1:1")]
    Square1x1,
    #[serde(rename = "4:3")]
    Classic4x3,
    #[serde(rename = "21:9")]
    Ultrawide21x9,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Landscape16x9,
        AspectRatio::Portrait9x16,
        AspectRatio::Square1x1,
        AspectRatio::Classic4x3,
        AspectRatio::Ultrawide21x9,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landscape16x9 => "16:9",
            Self::Portrait9x16 => "9:16",
            Self::Square1x1 => "1:1",
            Self::Classic4x3 => "4:3",
            Self::Ultrawide21x9 => "21:9",
        }
    }

    pub fn from_name(name: &str) -> Self {
        lookup(&Self::ALL, name, Self::as_str).unwrap_or_else(|| {
            tracing::debug!(name, "presets: unknown aspect ratio, using default");
            Self::default()
        })
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Landscape16x9 => (1920, 1080),
            Self::Portrait9x16 => (1080, 1920),
            Self::Square1x1 => (1080, 1080),
            Self::Classic4x3 => (1440, 1080),
            Self::Ultrawide21x9 => (2560, 1080),
        }
    }
}

fn lookup<T: Copy>(all: &[T], name: &str, as_str: fn(T) -> &'static str) -> Option<T> {
    let name = name.trim();
    all.iter()
        .copied()
        .find(|&candidate| as_str(candidate).eq_ignore_ascii_case(name))
}
