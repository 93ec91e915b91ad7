use super::config::ConfigError;
use crate::core::models::orientation::OrientationError;
use crate::core::models::structure::TransformError;
use crate::core::utils::geometry::GeometryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid point sequence shape in {operation}: {source}")]
    Shape {
        operation: &'static str,
        #[source]
        source: GeometryError,
    },

    #[error("Degenerate input in {operation}: {reason}")]
    DegenerateInput {
        operation: &'static str,
        reason: String,
    },

    #[error("Structure '{structure_id}' has an unusable orientation: {source}")]
    Orientation {
        structure_id: String,
        #[source]
        source: OrientationError,
    },

    #[error("Alignment of '{moving_id}' onto '{reference_id}' failed: {source}")]
    Alignment {
        reference_id: String,
        moving_id: String,
        #[source]
        source: Box<EngineError>,
    },

    #[error("Transform of structure '{structure_id}' rejected: {source}")]
    Transform {
        structure_id: String,
        #[source]
        source: TransformError,
    },

    #[error("Structure not found: {0}")]
    StructureNotFound(String),

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

impl EngineError {
    pub(crate) fn shape(operation: &'static str, source: GeometryError) -> Self {
        Self::Shape { operation, source }
    }

    pub(crate) fn degenerate(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn alignment(reference_id: &str, moving_id: &str, source: EngineError) -> Self {
        Self::Alignment {
            reference_id: reference_id.to_string(),
            moving_id: moving_id.to_string(),
            source: Box::new(source),
        }
    }

    /// The innermost non-wrapper error, useful for matching on the failure kind.
    pub fn root_cause(&self) -> &EngineError {
        match self {
            Self::Alignment { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
