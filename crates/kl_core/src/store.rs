use std::path::{Path, PathBuf};

use crate::{
    file_utils::{self, create_parent_dir, hashes_match},
    pt, DownloadFileError, IntoIoError, RequestError, StoreLayout,
};

/// The network side of the store.
///
/// [`crate::HttpFetcher`] is the real one,
/// `MemoryFetcher` (behind the `test-utils` feature)
/// serves canned bytes for tests.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Downloads a (small) document into a `String`.
    async fn fetch_to_string(&self, url: &str) -> Result<String, RequestError>;

    /// Downloads `url` into the file at `path`, creating
    /// parent directories and replacing any existing file.
    async fn fetch_to_path(&self, url: &str, path: &Path) -> Result<(), DownloadFileError>;
}

/// One file the store should have: where it comes from,
/// where it goes, and (optionally) what its SHA-1 must be.
///
/// Client jar, libraries, native bundles, asset indexes and
/// asset objects are all just `ContentItem`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub url: String,
    pub path: PathBuf,
    pub sha1: Option<String>,
}

impl ContentItem {
    #[must_use]
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>, sha1: Option<String>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            sha1,
        }
    }

    #[must_use]
    pub fn verified(url: impl Into<String>, path: impl Into<PathBuf>, sha1: &str) -> Self {
        Self::new(url, path, Some(sha1.to_owned()))
    }

    #[must_use]
    pub fn unverified(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(url, path, None)
    }

    fn display_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.to_string_lossy().into_owned(),
            |n| n.to_string_lossy().into_owned(),
        )
    }
}

/// The local file cache. Everything the launcher
/// downloads goes through [`ContentStore::ensure`].
///
/// The store is the only persistent state: files stay
/// across runs, and a file whose hash still matches is
/// never downloaded again.
pub struct ContentStore<F> {
    layout: StoreLayout,
    fetcher: F,
}

impl<F: Fetcher> ContentStore<F> {
    pub fn new(root: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            layout: StoreLayout::new(root),
            fetcher,
        }
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Makes sure `item` is present at `item.path`, returning that path.
    ///
    /// - If a hash is given and the existing file matches it,
    ///   returns without touching the network.
    /// - Otherwise downloads the file, then checks the hash again.
    ///   On mismatch the file is deleted, so a corrupt file is
    ///   never left behind under its real name.
    /// - Without a hash, whatever was downloaded is kept.
    ///
    /// # Errors
    /// - The request failed (status code, connection, timeout)
    /// - The file could not be written, read or deleted
    /// - [`DownloadFileError::HashMismatch`] if the downloaded
    ///   file doesn't have the expected hash
    pub async fn ensure(&self, item: &ContentItem) -> Result<PathBuf, DownloadFileError> {
        if let Some(expected) = &item.sha1 {
            if is_valid_copy(&item.path, expected).await? {
                return Ok(item.path.clone());
            }
        }

        pt!("Downloading {}", item.display_name());
        create_parent_dir(&item.path).await?;
        self.fetcher.fetch_to_path(&item.url, &item.path).await?;

        if let Some(expected) = &item.sha1 {
            let got = file_utils::sha1_file(&item.path).await?;
            if !hashes_match(&got, expected) {
                tokio::fs::remove_file(&item.path)
                    .await
                    .path(&item.path)?;
                return Err(DownloadFileError::HashMismatch {
                    path: item.path.clone(),
                    expected: expected.clone(),
                    got,
                });
            }
        }

        Ok(item.path.clone())
    }

    /// Like [`ContentStore::ensure`], but for documents with no
    /// hash: once a local copy exists it is reused as-is.
    ///
    /// # Errors
    /// Same as [`ContentStore::ensure`].
    pub async fn ensure_cached(&self, item: &ContentItem) -> Result<PathBuf, DownloadFileError> {
        if item.sha1.is_none() && item.path.is_file() {
            return Ok(item.path.clone());
        }
        self.ensure(item).await
    }
}

async fn is_valid_copy(path: &Path, expected: &str) -> Result<bool, DownloadFileError> {
    if !path.is_file() {
        return Ok(false);
    }
    let got = file_utils::sha1_file(path).await?;
    Ok(hashes_match(&got, expected))
}
