pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod presets;
pub mod script;
pub mod session;
pub mod srt;
pub mod timeline;
pub mod types;

pub use alignment::report::{compute_report, TimelineReport};
pub use config::{EstimatorConfig, HighlightTolerance, TimelineConfig};
pub use error::TimelineError;
pub use pipeline::builder::TimelineBuilder;
pub use pipeline::runtime::TimelineEngine;
pub use pipeline::traits::{SceneAllocator, SegmentPlanner, WordTimer};
pub use presets::{AspectRatio, KaraokeStyle, VoiceTone};
pub use script::AdScript;
pub use session::SessionContext;
pub use timeline::{ActiveWord, DurationOrigin, ReconciledDuration, TimelinePlan};
pub use types::{
    CharacterTiming, NarrationInput, Scene, SceneAsset, SubtitleSegment, TimingSource, WordTiming,
};
