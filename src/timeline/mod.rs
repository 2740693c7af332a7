pub mod duration;
pub mod highlight;
pub mod plan;
pub mod scenes;

pub use duration::{
    clamp_segments, clamp_words, reconcile_duration, trim_to_duration, DurationOrigin,
    DurationSources, ReconciledDuration,
};
pub use highlight::active_word_index;
pub use plan::{ActiveWord, TimelinePlan};
pub use scenes::{allocate_scenes, scene_index_at};
