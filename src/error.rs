//! Error types for configuration, navigation and rendering

use thiserror::Error;

/// Problems with a solar-system description
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("system has no bodies")]
    Empty,

    #[error("system must contain exactly one star, found {0}")]
    StarCount(usize),

    #[error("duplicate body name '{0}'")]
    DuplicateBody(String),

    #[error("body '{name}': {reason}")]
    InvalidBody { name: String, reason: String },

    #[error("ring band {band} of '{body}': inner radius {inner} exceeds outer radius {outer}")]
    RingBounds { body: String, band: usize, inner: f32, outer: f32 },
}

/// Rejected navigation requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FocusError {
    #[error("navigation in progress, please wait")]
    TransitionInProgress,

    #[error("no celestial body named '{0}'")]
    UnknownBody(String),
}

/// WebGL setup and upload failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to get WebGL2 context")]
    NoContext,

    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    #[error("program linking failed: {0}")]
    ProgramLink(String),

    #[error("failed to create {0}")]
    Allocation(&'static str),
}
