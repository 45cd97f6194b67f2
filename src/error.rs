use file_pattern::PatternError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GroupError>;

#[derive(Debug, Error)]
pub enum GroupError {
    #[error("cannot read directory {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("field {field}: images come from {} acquisitions: {}", .heads.len(), .heads.join(", "))]
    MultipleHeads { field: String, heads: Vec<String> },

    #[error("field {field}: expected {expected} images (channels x timepoints), found {found}")]
    MissingImages {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid filename convention: {0}")]
    Convention(#[from] regex::Error),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(
        "patterns do not account for the listed files: {} missing, {} unexpected",
        .missing.len(),
        .unexpected.len()
    )]
    Unaccounted {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}
