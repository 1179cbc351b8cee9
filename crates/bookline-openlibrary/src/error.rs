//! Pipeline fault taxonomy
//!
//! Each stage has its own error type; [`PipelineError`] tags which stage
//! failed so callers can branch on [`FaultKind`] instead of message text.

use bookline_core::FetchError;

use crate::load::LoadError;
use crate::transform::TransformError;

/// Which class of fault aborted a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Extract: connection failure, timeout, non-JSON body
    Network,
    /// Transform: missing or malformed keys in the response
    Structural,
    /// Load: connection, authentication, DDL or insert failure
    Persistence,
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Structural => write!(f, "structural"),
            Self::Persistence => write!(f, "persistence"),
        }
    }
}

#[derive(Debug)]
pub enum PipelineError {
    Network(FetchError),
    Structural(TransformError),
    Persistence(LoadError),
}

impl PipelineError {
    pub fn kind(&self) -> FaultKind {
        match self {
            Self::Network(_) => FaultKind::Network,
            Self::Structural(_) => FaultKind::Structural,
            Self::Persistence(_) => FaultKind::Persistence,
        }
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(e) => write!(f, "{} fault: {e}", self.kind()),
            Self::Structural(e) => write!(f, "{} fault: {e}", self.kind()),
            Self::Persistence(e) => write!(f, "{} fault: {e}", self.kind()),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network(e) => Some(e),
            Self::Structural(e) => Some(e),
            Self::Persistence(e) => Some(e),
        }
    }
}

impl From<FetchError> for PipelineError {
    fn from(e: FetchError) -> Self {
        Self::Network(e)
    }
}

impl From<TransformError> for PipelineError {
    fn from(e: TransformError) -> Self {
        Self::Structural(e)
    }
}

impl From<LoadError> for PipelineError {
    fn from(e: LoadError) -> Self {
        Self::Persistence(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_per_stage() {
        let network = PipelineError::from(FetchError::Http {
            status: None,
            message: "refused".to_string(),
        });
        assert_eq!(network.kind(), FaultKind::Network);

        let structural = PipelineError::from(TransformError::MissingWorks);
        assert_eq!(structural.kind(), FaultKind::Structural);

        let persistence = PipelineError::from(LoadError::UnsupportedUrl("mysql".to_string()));
        assert_eq!(persistence.kind(), FaultKind::Persistence);
    }

    #[test]
    fn display_prefixes_kind() {
        let err = PipelineError::from(TransformError::WorksNotList);
        assert_eq!(format!("{err}"), "structural fault: 'works' is not a list");
    }
}
