use std::io;
use std::path::PathBuf;

use oi_frontend::TableError;
use oi_graph::CacheError;
use oi_parse::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse translation unit '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid translation unit: {0}")]
    Table(#[from] TableError),

    #[error("no type named '{0}' in translation unit")]
    UnknownRoot(String),

    #[error("failed to build type graph for '{root}': {source}")]
    Parse {
        root: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to store type graph cache: {0}")]
    Cache(#[from] CacheError),

    #[error("{failed} of {total} root types failed")]
    RootsFailed { failed: usize, total: usize },
}
