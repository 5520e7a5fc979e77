use thiserror::Error;

/// A failed operation on a [`Surface`](crate::surface::Surface).
///
/// None of these are fatal to a portal: creation failures leave it inert,
/// and attachment failures are skipped until the next time the effect runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("no rendering surface is available")]
    Unavailable,
    #[error("could not create <{tag}> element: {reason}")]
    CreateElement { tag: String, reason: String },
    #[error("could not append child: {0}")]
    Append(String),
    #[error("this surface does not support shadow roots")]
    ShadowRootUnsupported,
    #[error("could not attach shadow root: {0}")]
    ShadowRoot(String),
}

#[derive(Debug, Error, Clone)]
pub enum PortalConfigError {
    #[error("Config Error: {0}")]
    ConfigError(String),
    #[error("invalid host tag {0:?}: expected an ASCII letter followed by letters, digits or '-'")]
    InvalidHostTag(String),
}

impl From<config::ConfigError> for PortalConfigError {
    fn from(e: config::ConfigError) -> Self {
        Self::ConfigError(e.to_string())
    }
}
