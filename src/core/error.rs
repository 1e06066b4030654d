use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeedrunError {
    #[error("missing required parameter: {name}")]
    MissingParameter { name: &'static str },
    #[error("invalid configuration: {message}")]
    Configuration { message: String },
    #[error("{program} binary not found in PATH")]
    BinaryNotFound { program: String },
    #[error("ffmpeg process failed (exit_code={exit_code:?})")]
    ExternalTool { exit_code: Option<i32> },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SpeedrunError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Usage errors come from the operator's arguments, not from ffmpeg.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::MissingParameter { .. } | Self::Configuration { .. })
    }
}
