use std::fmt;

use crate::gl::ShaderStage;

/// GPU object kinds that can fail to allocate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GlObject {
    Shader(ShaderStage),
    Program,
}

impl fmt::Display for GlObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shader(stage) => write!(f, "{stage} shader"),
            Self::Program => f.write_str("program"),
        }
    }
}

/// Failure to build a shader stage or a program.
///
/// Every variant is deterministic for a given source and driver, so callers
/// report it instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Source text was empty or whitespace only.
    EmptySource(ShaderStage),
    /// The driver handed back the reserved name `0`.
    ResourceExhausted { object: GlObject },
    /// `log` is `None` when the driver reported no diagnostic text.
    Compile { stage: ShaderStage, log: Option<String> },
    Link { log: Option<String> },
}

impl BuildError {
    /// Driver diagnostic, if one was produced.
    pub fn log(&self) -> Option<&str> {
        match self {
            Self::Compile { log, .. } | Self::Link { log } => log.as_deref(),
            Self::EmptySource(_) | Self::ResourceExhausted { .. } => None,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySource(stage) => write!(f, "{stage} shader source is empty"),
            Self::ResourceExhausted { object } => write!(f, "failed to allocate {object} object"),
            Self::Compile { stage, log: Some(log) } => {
                write!(f, "failed to compile {stage} shader:\n{log}")
            }
            Self::Compile { stage, log: None } => {
                write!(f, "failed to compile {stage} shader (no diagnostic)")
            }
            Self::Link { log: Some(log) } => write!(f, "failed to link program:\n{log}"),
            Self::Link { log: None } => f.write_str("failed to link program (no diagnostic)"),
        }
    }
}

impl std::error::Error for BuildError {}

/// Applies the info-log length guard.
///
/// GL counts the terminating NUL, so a length of 1 (or less) means there is
/// no text; some drivers report exactly that for failed objects.
pub(super) fn read_log(length: i32, read: impl FnOnce(i32) -> String) -> Option<String> {
    if length <= 1 {
        return None;
    }
    let text = read(length);
    let text = text.trim_end_matches(['\0', '\n', ' ']);
    if text.is_empty() { None } else { Some(text.to_string()) }
}
