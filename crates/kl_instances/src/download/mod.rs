pub mod constants;
mod library_downloader;
pub mod plan;

use std::path::PathBuf;

use kl_core::{
    info,
    json::{AssetIndexMap, Manifest, VersionDetails},
    ContentItem, ContentStore, DownloadError, Fetcher, IntoIoError, IntoJsonError, Platform,
};

use self::plan::{plan_assets, ArtifactPlan};

/// Looks up `version_id` in the catalog at `manifest_url`
/// and loads its details document through the store.
///
/// The catalog is fetched every time. The details document
/// is cached as `versions/<id>.json`: if the catalog gives
/// its hash, the cached copy is checked against it, otherwise
/// an existing copy is used without checking.
///
/// # Errors
/// - [`DownloadError::VersionNotFoundInManifest`] if there is
///   no exact match for `version_id` (nothing else is downloaded)
/// - Network, disk or JSON errors
pub async fn resolve_version<F: Fetcher>(
    store: &ContentStore<F>,
    manifest_url: &str,
    version_id: &str,
) -> Result<VersionDetails, DownloadError> {
    info!("Downloading version manifest.");
    let manifest = Manifest::download(store.fetcher(), manifest_url).await?;

    let version = manifest
        .find_name(version_id)
        .ok_or_else(|| DownloadError::VersionNotFoundInManifest(version_id.to_owned()))?;

    let item = ContentItem::new(
        &version.url,
        store.layout().version_json(&version.id),
        version.sha1.clone(),
    );
    let path = store.ensure_cached(&item).await?;

    let json = tokio::fs::read_to_string(&path).await.path(&path)?;
    Ok(serde_json::from_str(&json).json(&json)?)
}

/// Paths of a fully downloaded version, ready to be launched.
#[derive(Debug, Clone)]
pub struct DownloadedGame {
    pub client_jar: PathBuf,
    /// Libraries in classpath order (client jar not included).
    pub classpath: Vec<PathBuf>,
    pub natives_dir: PathBuf,
}

/// A struct that downloads everything one version needs,
/// strictly one file at a time.
///
/// Order: client jar, libraries and natives,
/// asset index, asset objects.
pub struct GameDownloader<'a, F> {
    store: &'a ContentStore<F>,
    pub version_json: VersionDetails,
    pub plan: ArtifactPlan,
    resources_url: String,
}

impl<'a, F: Fetcher> GameDownloader<'a, F> {
    /// Resolves the version (see [`resolve_version`])
    /// and plans its downloads.
    ///
    /// # Errors
    /// Same as [`resolve_version`].
    pub async fn new(
        store: &'a ContentStore<F>,
        manifest_url: &str,
        version_id: &str,
        resources_url: &str,
        platform: Option<Platform>,
    ) -> Result<Self, DownloadError> {
        let version_json = resolve_version(store, manifest_url, version_id).await?;
        Ok(Self::with_version(
            store,
            version_json,
            resources_url,
            platform,
        ))
    }

    #[must_use]
    pub fn with_version(
        store: &'a ContentStore<F>,
        version_json: VersionDetails,
        resources_url: &str,
        platform: Option<Platform>,
    ) -> Self {
        let plan = ArtifactPlan::new(&version_json, store.layout(), platform);
        Self {
            store,
            version_json,
            plan,
            resources_url: resources_url.to_owned(),
        }
    }

    /// # Errors
    /// If any download, hash check, or extraction fails.
    pub async fn download_all(&self) -> Result<DownloadedGame, DownloadError> {
        let client_jar = self.download_jar().await?;
        let classpath = self.download_libraries().await?;
        self.download_assets().await?;

        Ok(DownloadedGame {
            client_jar,
            classpath,
            natives_dir: self.plan.natives_dir.clone(),
        })
    }

    /// # Errors
    /// If the jar can't be downloaded or has the wrong hash.
    pub async fn download_jar(&self) -> Result<PathBuf, DownloadError> {
        info!("Downloading game jar file.");
        Ok(self.store.ensure(&self.plan.client).await?)
    }

    /// Downloads the asset index, then every object it lists.
    ///
    /// # Errors
    /// If the index is malformed, or any download or hash check fails.
    pub async fn download_assets(&self) -> Result<(), DownloadError> {
        info!("Downloading assets.");
        let index_path = self.store.ensure(&self.plan.asset_index).await?;

        let json = tokio::fs::read_to_string(&index_path)
            .await
            .path(&index_path)?;
        let index: AssetIndexMap = serde_json::from_str(&json).json(&json)?;

        let objects = plan_assets(&index, self.store.layout(), &self.resources_url);
        info!("Checking {} asset objects.", objects.len());
        for object in &objects {
            self.store.ensure(object).await?;
        }
        Ok(())
    }
}
