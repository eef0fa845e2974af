use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the file layer. The string transforms themselves never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid input file {}: no supported text encoding could decode it", .0.display())]
    Undecodable(PathBuf),

    #[error("invalid output file {}: parent directory does not exist", .0.display())]
    InvalidOutput(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
