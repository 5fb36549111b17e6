use std::{path::Path, time::Duration};

use futures::StreamExt;
use kl_reqwest::{Client, StatusCode};
use sha1::{Digest, Sha1};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::io::StreamReader;

use crate::{store::Fetcher, DownloadFileError, IntoIoError, IoError, LAUNCHER_VERSION_NAME};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const HASH_CHUNK_SIZE: usize = 8192;

/// The real network backend, a thin layer over a `reqwest::Client`.
///
/// Each request is a plain unauthenticated GET. Any failure,
/// including a timeout, is returned straight away; nothing is retried.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// # Errors
    /// If the TLS backend could not be initialized.
    pub fn new() -> Result<Self, RequestError> {
        let client = Client::builder()
            .user_agent(format!("kindling/{LAUNCHER_VERSION_NAME}"))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<kl_reqwest::Response, RequestError> {
        let response = self.client.get(url).send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(RequestError::DownloadError {
                code: response.status(),
                url: response.url().to_string(),
            })
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch_to_string(&self, url: &str) -> Result<String, RequestError> {
        Ok(self.get(url).await?.text().await?)
    }

    /// Downloads a file from the given URL and saves it to a path.
    ///
    /// The body is streamed to disk through a fixed-size
    /// buffer, so large jars never sit in memory whole.
    async fn fetch_to_path(&self, url: &str, path: &Path) -> Result<(), DownloadFileError> {
        let response = self.get(url).await?;

        let stream = response
            .bytes_stream()
            .map(|n| n.map_err(std::io::Error::other));
        let mut stream = StreamReader::new(stream);

        create_parent_dir(path).await?;

        let mut file = tokio::fs::File::create(path).await.path(path)?;
        let copied = tokio::io::copy(&mut stream, &mut file).await;
        if let Err(err) = copied {
            // Never leave a truncated file at the destination.
            drop(file);
            _ = tokio::fs::remove_file(path).await;
            return Err(IoError::Io {
                error: err.to_string(),
                path: path.to_owned(),
            }
            .into());
        }
        file.flush().await.path(path)?;
        Ok(())
    }
}

const NETWORK_ERROR_MSG: &str = r"
- Check your internet connection
- Check if you are behind a firewall/proxy
- Try doing the action again

";

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Download Error (code {code}){NETWORK_ERROR_MSG}Url: {url}")]
    DownloadError { code: StatusCode, url: String },
    #[error("Network Request Error{NETWORK_ERROR_MSG}{0}")]
    ReqwestError(#[from] kl_reqwest::Error),
}

/// Creates the parent directory of `path` if it doesn't exist yet.
///
/// # Errors
/// If the directory could not be created (permissions,
/// or part of the path is a file).
pub async fn create_parent_dir(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        if !parent.is_dir() {
            tokio::fs::create_dir_all(parent).await.path(parent)?;
        }
    }
    Ok(())
}

/// Computes the lowercase hex SHA-1 of a file,
/// reading it in small chunks.
///
/// # Errors
/// If the file doesn't exist or can't be read.
pub async fn sha1_file(path: &Path) -> Result<String, IoError> {
    let mut file = tokio::fs::File::open(path).await.path(path)?;
    let mut hasher = Sha1::new();
    let mut buf = vec![0; HASH_CHUNK_SIZE];
    loop {
        let read = file.read(&mut buf).await.path(path)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Lowercase hex SHA-1 of an in-memory buffer.
#[must_use]
pub fn sha1_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}

/// Hex digests coming from documents are not
/// always lowercase, so compare ignoring case.
#[must_use]
pub fn hashes_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Returns the path as a `&str`, or an error
/// if it isn't valid unicode (can't go on a command line then).
///
/// # Errors
/// If the path contains invalid unicode.
pub fn path_to_str(path: &Path) -> Result<&str, IoError> {
    path.to_str()
        .ok_or_else(|| IoError::PathNotUnicode(path.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha1_of_known_input() {
        // echo -n "hello" | sha1sum
        assert_eq!(
            sha1_bytes(b"hello"),
            "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
        );
    }

    #[test]
    fn hash_compare_ignores_case() {
        assert!(hashes_match(
            "AAF4C61DDCC5E8A2DABEDE0F3B482CD9AEA9434D",
            "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
        ));
        assert!(!hashes_match("aaf4", "aaf5"));
    }

    #[tokio::test]
    async fn file_hash_matches_buffer_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        // Spans several read chunks
        let data: Vec<u8> = (0..(HASH_CHUNK_SIZE * 3 + 17)).map(|n| n as u8).collect();
        tokio::fs::write(&path, &data).await.unwrap();

        assert_eq!(sha1_file(&path).await.unwrap(), sha1_bytes(&data));
    }

    #[tokio::test]
    async fn hashing_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = sha1_file(&dir.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, IoError::Io { .. }));
    }
}
