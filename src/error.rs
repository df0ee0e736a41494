//! Error types for jinglecut.

/// Result type alias for jinglecut operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for jinglecut.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// No input files matched.
    #[error("no input files found in '{dir}'")]
    NoInputFiles {
        /// Directory that was scanned.
        dir: std::path::PathBuf,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: std::path::PathBuf,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// Failed to compute the correlation trace.
    #[error("failed to compute correlation: {reason}")]
    Correlation {
        /// Description of the correlation failure.
        reason: String,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to spawn the external trim command.
    #[error("failed to run ffmpeg for '{path}'")]
    TrimSpawn {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// External trim command exited with a failure status.
    #[error("ffmpeg failed for '{path}': {detail}")]
    TrimFailed {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Captured stderr or exit status description.
        detail: String,
    },

    /// Failed to render a diagnostics plot.
    #[error("failed to write plot '{path}': {reason}")]
    PlotWrite {
        /// Path to the plot file.
        path: std::path::PathBuf,
        /// Description of the rendering failure.
        reason: String,
    },
}
