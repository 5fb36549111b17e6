use std::path::{Path, PathBuf};

use kl_core::{info, pt, DownloadError, Fetcher, IntoIoError};

use super::{plan::LibraryItem, GameDownloader};

impl<F: Fetcher> GameDownloader<'_, F> {
    /// Downloads every library and native bundle,
    /// extracting natives as it goes.
    ///
    /// Returns the classpath entries in order.
    ///
    /// # Errors
    /// If any download, hash check, or extraction fails.
    pub async fn download_libraries(&self) -> Result<Vec<PathBuf>, DownloadError> {
        info!("Starting download of libraries.");

        let natives_dir = &self.plan.natives_dir;
        tokio::fs::create_dir_all(natives_dir)
            .await
            .path(natives_dir)?;

        let mut classpath = Vec::new();
        for library in &self.plan.libraries {
            let path = self.store.ensure(library.item()).await?;
            match library {
                LibraryItem::Classpath(_) => classpath.push(path),
                LibraryItem::Excluded(_) => {}
                LibraryItem::Native(_) => {
                    pt!("Extracting natives: {}", path.display());
                    extract_natives(&path, natives_dir)?;
                }
            }
        }
        Ok(classpath)
    }
}

/// Unpacks a whole native bundle into `target_dir`.
///
/// Files from earlier bundles with the same
/// name are overwritten.
pub fn extract_natives(archive: &Path, target_dir: &Path) -> Result<(), DownloadError> {
    let file = std::fs::File::open(archive).path(archive)?;
    zip_extract::extract(file, target_dir, false).map_err(|error| {
        DownloadError::NativesExtractError {
            path: archive.to_owned(),
            error,
        }
    })
}
