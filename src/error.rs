use std::path::PathBuf;
use thiserror::Error;

/// Result type for dataset loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Error types raised while loading a dataset from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset directory not found: {0:?}")]
    MissingDirectory(PathBuf),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed annotation file {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse dataset catalog: {0}")]
    Catalog(#[source] serde_json::Error),

    #[error("category {name:?} in {path:?} is not part of the catalog")]
    UnknownCategory { path: PathBuf, name: String },

    #[error("annotation {annotation_id} references undeclared category id {category_id}")]
    UnknownCategoryId { annotation_id: u64, category_id: u64 },

    #[error("annotation {annotation_id} references undeclared pose id {pose_id}")]
    UnknownPoseId { annotation_id: u64, pose_id: u64 },

    #[error("annotation {annotation_id} has an invalid bbox {bbox:?}")]
    InvalidBox { annotation_id: u64, bbox: Vec<f64> },

    #[error("attribute {name:?} does not accept value {value}")]
    InvalidAttribute { name: String, value: String },

    #[error("failed to read image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
