use std::{
    collections::HashMap,
    path::Path,
    sync::{Mutex, PoisonError},
};

use crate::{
    file_utils::create_parent_dir, DownloadFileError, Fetcher, IntoIoError, RequestError,
};

/// A [`Fetcher`] that serves bytes from memory
/// and remembers every URL it was asked for.
///
/// Unknown URLs answer with a 404.
#[derive(Default)]
pub struct MemoryFetcher {
    responses: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or replaces) what `url` returns.
    pub fn insert(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.into(), body.into());
    }

    /// Every URL requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn respond(&self, url: &str) -> Result<Vec<u8>, RequestError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_owned());
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
            .ok_or_else(|| RequestError::DownloadError {
                code: kl_reqwest::StatusCode::NOT_FOUND,
                url: url.to_owned(),
            })
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch_to_string(&self, url: &str) -> Result<String, RequestError> {
        let body = self.respond(url)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn fetch_to_path(&self, url: &str, path: &Path) -> Result<(), DownloadFileError> {
        let body = self.respond(url)?;
        create_parent_dir(path).await?;
        tokio::fs::write(path, body).await.path(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_url_is_404_and_recorded() {
        let fetcher = MemoryFetcher::new();
        fetcher.insert("https://example.invalid/a", "a");

        assert_eq!(
            fetcher.fetch_to_string("https://example.invalid/a").await.unwrap(),
            "a"
        );
        let err = fetcher
            .fetch_to_string("https://example.invalid/b")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RequestError::DownloadError { code, .. } if code == kl_reqwest::StatusCode::NOT_FOUND
        ));
        assert_eq!(
            fetcher.requests(),
            vec!["https://example.invalid/a", "https://example.invalid/b"]
        );
    }
}
