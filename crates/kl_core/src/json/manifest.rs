use serde::Deserialize;

use crate::{DownloadError, Fetcher, IntoJsonError};

/// The official version catalog
/// (list of all versions and where their details live).
///
/// Only what resolving an exact version id needs is read;
/// `latest`, `type`, `releaseTime` and so on are ignored.
#[derive(Deserialize, Clone, Debug)]
pub struct Manifest {
    pub versions: Vec<Version>,
}

impl Manifest {
    /// Downloads and parses the catalog at `url`.
    ///
    /// The catalog is small and changes upstream whenever
    /// a version is released, so it is never cached.
    ///
    /// # Errors
    /// If the file cannot be downloaded or parsed into JSON.
    pub async fn download(fetcher: &impl Fetcher, url: &str) -> Result<Manifest, DownloadError> {
        let text = fetcher.fetch_to_string(url).await?;
        Ok(serde_json::from_str(&text).json(&text)?)
    }

    /// Looks up a version by its name.
    /// This searches for an *exact match*.
    #[must_use]
    pub fn find_name(&self, name: &str) -> Option<&Version> {
        self.versions.iter().find(|n| n.id == name)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Version {
    pub id: String,
    pub url: String,
    /// Hash of the version details document.
    /// Only present in v2 catalogs.
    pub sha1: Option<String>,
}
