use std::path::PathBuf;

use thiserror::Error;

use crate::RequestError;

#[derive(Clone, Debug, Error)]
pub enum IoError {
    #[error("at path {path:?}, error: {error}")]
    Io { error: String, path: PathBuf },
    #[error("path is not valid unicode: {0:?}")]
    PathNotUnicode(PathBuf),
}

pub trait IntoIoError<T> {
    #[allow(clippy::missing_errors_doc)]
    fn path(self, p: impl Into<PathBuf>) -> Result<T, IoError>;
}

impl<T> IntoIoError<T> for std::io::Result<T> {
    fn path(self, p: impl Into<PathBuf>) -> Result<T, IoError> {
        self.map_err(|err: std::io::Error| IoError::Io {
            error: err.to_string(),
            path: p.into(),
        })
    }
}

const JSON_SNIPPET_LEN: usize = 200;

/// A document that could not be parsed.
///
/// Keeps the start of the offending text around,
/// since "expected value at line 1 column 1" alone
/// usually means we got an HTML error page.
#[derive(Debug, Error)]
#[error("malformed json: {error}\nDocument starts with: {snippet}")]
pub struct JsonError {
    pub error: serde_json::Error,
    pub snippet: String,
}

pub trait IntoJsonError<T> {
    #[allow(clippy::missing_errors_doc)]
    fn json(self, text: impl AsRef<str>) -> Result<T, JsonError>;
}

impl<T> IntoJsonError<T> for Result<T, serde_json::Error> {
    fn json(self, text: impl AsRef<str>) -> Result<T, JsonError> {
        self.map_err(|error| JsonError {
            error,
            snippet: text.as_ref().chars().take(JSON_SNIPPET_LEN).collect(),
        })
    }
}

/// Error from [`crate::ContentStore::ensure`].
#[derive(Debug, Error)]
pub enum DownloadFileError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("sha1 mismatch for {path:?}: expected {expected}, got {got} (file deleted)")]
    HashMismatch {
        path: PathBuf,
        expected: String,
        got: String,
    },
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error("sha1 mismatch for {path:?}: expected {expected}, got {got} (file deleted)")]
    HashMismatch {
        path: PathBuf,
        expected: String,
        got: String,
    },
    #[error("version not found in manifest.json: {0}")]
    VersionNotFoundInManifest(String),
    #[error("could not extract native libraries from {path:?}: {error}")]
    NativesExtractError {
        path: PathBuf,
        error: zip_extract::ZipExtractError,
    },
}

impl From<DownloadFileError> for DownloadError {
    fn from(value: DownloadFileError) -> Self {
        match value {
            DownloadFileError::Request(err) => DownloadError::Request(err),
            DownloadFileError::Io(err) => DownloadError::Io(err),
            DownloadFileError::HashMismatch {
                path,
                expected,
                got,
            } => DownloadError::HashMismatch {
                path,
                expected,
                got,
            },
        }
    }
}
