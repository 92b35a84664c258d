//! Error handling for Strata
//!
//! Every failure names the layer at fault so that a problem deep inside a
//! layer composition can be located from the message alone.

use thiserror::Error;

use crate::layer::HookPhase;

/// Result type alias for Strata operations
pub type Result<T> = std::result::Result<T, StrataError>;

/// Main error type for Strata operations
#[derive(Error, Debug)]
pub enum StrataError {
    // Linearization Errors
    #[error("Inconsistent layer hierarchy: no valid resolution order exists for {layer}")]
    InconsistentHierarchy { layer: String },

    // Resource Errors
    #[error("No resource {key:?} visible from {layer}")]
    KeyNotFound { key: String, layer: String },

    // Lifecycle Errors
    #[error("{phase} failed in {layer}")]
    HookFailed {
        phase: HookPhase,
        layer: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{layer} has already been torn down and cannot be set up again")]
    LayerRetired { layer: String },

    #[error("{layer} has not been set up")]
    NotSetUp { layer: String },

    // Graph Description Errors
    #[error("Layer {layer:?} names unknown base {base:?}")]
    UnknownBase { layer: String, base: String },

    #[error("Duplicate layer name {name:?} in graph description")]
    DuplicateLayer { name: String },

    #[error("No layer named {name:?} in graph description")]
    UnknownLayer { name: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StrataError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            StrataError::InconsistentHierarchy { .. } => "INCONSISTENT_HIERARCHY",
            StrataError::KeyNotFound { .. } => "KEY_NOT_FOUND",
            StrataError::HookFailed { .. } => "HOOK_FAILED",
            StrataError::LayerRetired { .. } => "LAYER_RETIRED",
            StrataError::NotSetUp { .. } => "NOT_SET_UP",
            StrataError::UnknownBase { .. } => "UNKNOWN_BASE",
            StrataError::DuplicateLayer { .. } => "DUPLICATE_LAYER",
            StrataError::UnknownLayer { .. } => "UNKNOWN_LAYER",
            StrataError::Io(_) => "IO_ERROR",
            StrataError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable by the caller
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StrataError::KeyNotFound { .. } | StrataError::NotSetUp { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = StrataError::KeyNotFound {
            key: "database".to_string(),
            layer: "<Layer 'app.Database'>".to_string(),
        };
        assert_eq!(err.error_code(), "KEY_NOT_FOUND");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_inconsistent_hierarchy_message_names_layer() {
        let err = StrataError::InconsistentHierarchy {
            layer: "<Layer 'app.Broken'>".to_string(),
        };
        assert!(err.to_string().contains("<Layer 'app.Broken'>"));
        assert!(!err.is_recoverable());
    }
}
