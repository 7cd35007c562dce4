//! Error type for `loupe-store-csv`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("storage task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
    let path = path.into();
    move |source| Error::Io { path, source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
