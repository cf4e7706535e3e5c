use {
    std::{io, path::PathBuf},
    thiserror::Error,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The output file could not be opened, written or flushed.
    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures of the in-memory customer store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("customer {0} not found")]
    NotFound(u64),

    #[error("all fields are required, {0} is empty")]
    MissingField(&'static str),

    #[error("email {0} already exists")]
    DuplicateEmail(String),
}

impl Error {
    pub(crate) fn output_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

/// Unwraps the OS error behind a `csv::Error` so its kind survives.
pub(crate) fn into_io(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(err) => err,
        kind => io::Error::other(format!("{kind:?}")),
    }
}
