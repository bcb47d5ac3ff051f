use thiserror::Error;

/// Errors that can occur at the declarative JSON boundary.
#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("failed to read or write topology JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading a schema catalog document.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when persisting or restoring a graph snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot file access failed: {0}")]
    Io(#[from] std::io::Error),
}
