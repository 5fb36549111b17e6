use kl_core::{DownloadError, IoError, RequestError};
use thiserror::Error;

const GAME_ERR_PREFIX: &str = "while launching game:\n";

#[derive(Debug, Error)]
pub enum GameLaunchError {
    #[error("{GAME_ERR_PREFIX}{0}")]
    Io(#[from] IoError),
    #[error("{GAME_ERR_PREFIX}{0}")]
    DownloadError(#[from] DownloadError),
    #[error("username contains spaces")]
    UsernameHasSpaces,
    #[error("username is empty")]
    UsernameIsEmpty,
    #[error("{GAME_ERR_PREFIX}couldn't run java command ({java}): {error}")]
    CommandError { java: String, error: std::io::Error },
}

impl From<RequestError> for GameLaunchError {
    fn from(value: RequestError) -> Self {
        Self::DownloadError(DownloadError::Request(value))
    }
}
