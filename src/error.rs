use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Coarse classification of a [`MapError`], used by callers that only need to
/// decide how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A map, tileset, image, object or manifest entry does not exist.
    NotFound,
    /// A document is malformed or fails schema validation.
    Parse,
    /// A global tile id lies outside every declared tileset range.
    Resolution,
    /// Reading or writing a file failed.
    Io,
    /// A manifest already contains the path being appended.
    Duplicate,
}

/// Error type for map loading, editing and persistence.
#[derive(Debug, Error)]
pub enum MapError {
    /// A map, tileset, image or manifest file is missing.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// No object layer of the map holds an object with this id.
    #[error("object {object_id} not found in {path}")]
    ObjectNotFound { path: PathBuf, object_id: u32 },

    /// The manifest does not contain this entry.
    #[error("manifest entry not found: {entry}")]
    EntryNotFound { entry: String },

    /// JSON syntax or shape error.
    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The map document is well-formed JSON but not a usable map.
    #[error("invalid map: {0}")]
    InvalidMap(String),

    /// The tileset document cannot be used to slice an atlas.
    #[error("invalid tileset {path}: {reason}")]
    InvalidTileset { path: PathBuf, reason: String },

    /// A tile layer's data length does not match the map dimensions.
    #[error("invalid layer size for layer '{layer}': expected {expected} cells, found {actual}")]
    InvalidLayerSize {
        layer: String,
        expected: usize,
        actual: usize,
    },

    /// The image collaborator could not decode an atlas.
    #[error("failed to decode image {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// A global tile id is below every tileset's first gid.
    #[error("gid {gid} does not belong to any tileset")]
    UnresolvedGid { gid: u32 },

    /// File I/O error.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The manifest already contains this entry.
    #[error("manifest already contains {entry}")]
    Duplicate { entry: String },
}

impl MapError {
    /// Where this error sits in the editor's error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapError::FileNotFound { .. }
            | MapError::ObjectNotFound { .. }
            | MapError::EntryNotFound { .. } => ErrorKind::NotFound,
            MapError::Json { .. }
            | MapError::InvalidMap(_)
            | MapError::InvalidTileset { .. }
            | MapError::InvalidLayerSize { .. }
            | MapError::Decode { .. } => ErrorKind::Parse,
            MapError::UnresolvedGid { .. } => ErrorKind::Resolution,
            MapError::Io { .. } => ErrorKind::Io,
            MapError::Duplicate { .. } => ErrorKind::Duplicate,
        }
    }

    /// Classifies a read failure: a missing file becomes [`MapError::FileNotFound`].
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            MapError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MapError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
