use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TimelineError;
use crate::srt;
use crate::timeline::ReconciledDuration;
use crate::types::{CharacterTiming, SubtitleSegment, WordTiming};

/// Per-request state passed explicitly into each stage.
///
/// The reconciled duration is write-once: the first value attached wins and
/// later attempts get that value back unchanged.
#[derive(Debug)]
pub struct SessionContext {
    id: String,
    artifact_dir: PathBuf,
    created_at: DateTime<Utc>,
    duration: OnceLock<ReconciledDuration>,
}

#[derive(Serialize)]
struct TimingDump<'a> {
    session_id: &'a str,
    transcript: &'a str,
    duration: Option<f64>,
    word_timings: &'a [WordTiming],
    character_timings: &'a [CharacterTiming],
}

impl SessionContext {
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), artifact_dir)
    }

    pub fn with_id(id: impl Into<String>, artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            artifact_dir: artifact_dir.into(),
            created_at: Utc::now(),
            duration: OnceLock::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn duration(&self) -> Option<ReconciledDuration> {
        self.duration.get().copied()
    }

    /// Attaches the session's reconciled duration and returns the stored value.
    pub fn attach_duration(&self, candidate: ReconciledDuration) -> ReconciledDuration {
        let mut fresh = false;
        let stored = *self.duration.get_or_init(|| {
            fresh = true;
            candidate
        });
        if !fresh {
            tracing::warn!(
                session_id = self.id.as_str(),
                stored_secs = stored.secs,
                candidate_secs = candidate.secs,
                "session: duration already reconciled, keeping stored value"
            );
        }
        stored
    }

    /// Per-session artifact file name: `{id}_{suffix}` under the artifact dir.
    pub fn artifact_path(&self, suffix: &str) -> PathBuf {
        self.artifact_dir.join(format!("{}_{suffix}", self.id))
    }

    pub fn write_srt(&self, segments: &[SubtitleSegment]) -> Result<PathBuf, TimelineError> {
        let path = self.artifact_path("subtitles.srt");
        self.ensure_artifact_dir()?;
        fs::write(&path, srt::render(segments)).map_err(|e| TimelineError::io("write subtitles", e))?;
        tracing::info!(
            session_id = self.id.as_str(),
            segment_count = segments.len(),
            path = %path.display(),
            "session: wrote subtitles"
        );
        Ok(path)
    }

    /// Writes word and character timing as JSON for debugging.
    pub fn write_timing_dump(
        &self,
        transcript: &str,
        words: &[WordTiming],
        characters: &[CharacterTiming],
    ) -> Result<PathBuf, TimelineError> {
        let path = self.artifact_path("timing.json");
        self.ensure_artifact_dir()?;
        let dump = TimingDump {
            session_id: &self.id,
            transcript,
            duration: self.duration().map(|d| d.secs),
            word_timings: words,
            character_timings: characters,
        };
        let mut file = File::create(&path).map_err(|e| TimelineError::io("create timing dump", e))?;
        serde_json::to_writer_pretty(&mut file, &dump)
            .map_err(|e| TimelineError::json("serialize timing dump", e))?;
        file.write_all(b"\n")
            .map_err(|e| TimelineError::io("finalize timing dump", e))?;
        Ok(path)
    }

    fn ensure_artifact_dir(&self) -> Result<(), TimelineError> {
        fs::create_dir_all(&self.artifact_dir)
            .map_err(|e| TimelineError::io("create artifact directory", e))
    }
}
