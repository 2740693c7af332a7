use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error(
        "no valid duration source (measured={measured:?}, authored={authored:?}, hard_cap={hard_cap})"
    )]
    NoValidDuration {
        measured: Option<f64>,
        authored: Option<f64>,
        hard_cap: f64,
    },
}

impl TimelineError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
