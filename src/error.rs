use std::path::PathBuf;

use thiserror::Error;

/// Failures at the edges of a run: reading workbooks, writing documents, loading settings.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open workbook {path:?}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read sheet {sheet:?} of {path:?}: {source}")]
    Sheet {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid layout: {0}")]
    Layout(String),
}

pub type Result<T> = std::result::Result<T, Error>;
