use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no such file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mapping entry without a `token:name` shape.
    #[error("malformed mapping entry: {0:?}")]
    MalformedMapping(String),

    /// A mapping entry that would give a token two names, or a name two tokens.
    #[error("mapping entry {entry:?} conflicts with {existing:?}")]
    ConflictingMapping { entry: String, existing: String },

    #[error("token file line has no token: {0:?}")]
    InvalidTokenLine(String),
}
