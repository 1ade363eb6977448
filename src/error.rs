//! Error types surfaced outside the graph core.
//!
//! Structural rejections are not errors (they are ordinary `false` results
//! with a [`LinkRejection`](crate::graph::LinkRejection) reason) and broken
//! graph invariants panic. What remains are failures of external resources.

use thiserror::Error;

/// Failure to load the editor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of the texture service while uploading a node preview.
///
/// Stored on the node until the next successful upload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    #[error("Texture creation failed: {0}")]
    Create(String),
    #[error("Texture update failed: {0}")]
    Update(String),
}
