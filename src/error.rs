use thiserror::Error;

/// The catalog resource could not be retrieved. Fatal to the load, never retried.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Catalog path {0} is invalid")]
    BadPath(String),

    #[error("Unable to read catalog {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FetchError>;
