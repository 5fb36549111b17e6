//! Turning a downloaded version into a running game.

use std::{path::PathBuf, process::ExitStatus};

use kl_core::{err, info, pt, ContentStore, Fetcher, HttpFetcher, IntoIoError};

use crate::{download::GameDownloader, LaunchConfig};

mod error;
mod launcher;

pub use error::GameLaunchError;
pub use launcher::{censor, resolve_java, run_game, write_argfile, Identity, LaunchPlan};

/// Everything is downloaded and the argument
/// file is written; only `java` is left to run.
#[derive(Debug, Clone)]
pub struct PreparedLaunch {
    pub plan: LaunchPlan,
    pub argfile: PathBuf,
}

/// Downloads whatever `config.version` is missing from
/// the store and writes the launch argument file.
///
/// # Errors
/// - If the username is empty or has spaces (checked
///   before any download)
/// - If the version doesn't exist, or any download,
///   hash check or extraction fails
/// - If the argument file can't be written
pub async fn prepare<F: Fetcher>(
    store: &ContentStore<F>,
    config: &LaunchConfig,
) -> Result<PreparedLaunch, GameLaunchError> {
    let identity = Identity::offline(&config.username)?;
    let layout = store.layout();

    info!("Preparing version {}", config.version);
    let downloader = GameDownloader::new(
        store,
        &config.manifest_url,
        &config.version,
        &config.resources_url,
        config.platform,
    )
    .await?;
    let game = downloader.download_all().await?;

    let game_dir = layout.game_dir();
    tokio::fs::create_dir_all(&game_dir).await.path(&game_dir)?;

    let plan = LaunchPlan::assemble(
        &game,
        &identity,
        &downloader.version_json,
        layout,
        config,
    )?;

    let arguments = plan.arguments();
    info!("Java args: {:?}", censor(&plan.java_arguments));
    info!("Game args: {:?}", censor(&plan.game_arguments));

    let argfile = layout.launch_args_file();
    write_argfile(&arguments, &argfile).await?;
    pt!("Wrote {} arguments to {argfile:?}", arguments.len());

    Ok(PreparedLaunch { plan, argfile })
}

/// Prepares `config.version` over the network and
/// runs it, waiting until the game exits.
///
/// # Errors
/// Same as [`prepare`], plus if `java` can't be started.
/// A game that exits with a failure code is *not* an error;
/// check the returned status.
pub async fn launch(config: &LaunchConfig) -> Result<ExitStatus, GameLaunchError> {
    tokio::fs::create_dir_all(&config.root)
        .await
        .path(&config.root)?;

    let store = ContentStore::new(&config.root, HttpFetcher::new()?);
    let prepared = prepare(&store, config).await?;

    info!("Launching game!");
    let status = run_game(
        &config.java,
        &prepared.argfile,
        store.layout().work_dir(),
    )
    .await?;

    if !status.success() {
        err!("Game exited with {status}");
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use kl_core::{DownloadError, MemoryFetcher};

    use super::*;

    #[tokio::test]
    async fn bad_username_fails_before_downloading() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path(), MemoryFetcher::new());
        let mut config = LaunchConfig::new(dir.path());
        config.username = "two words".to_owned();

        let err = prepare(&store, &config).await.unwrap_err();
        assert!(matches!(err, GameLaunchError::UsernameHasSpaces));
        assert!(store.fetcher().requests().is_empty());
    }

    #[tokio::test]
    async fn missing_version_writes_no_argfile() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path(), MemoryFetcher::new());
        let mut config = LaunchConfig::new(dir.path());
        config.manifest_url = "https://example.invalid/manifest.json".to_owned();
        config.version = "9.9".to_owned();
        store
            .fetcher()
            .insert(&config.manifest_url, r#"{"versions":[]}"#);

        let err = prepare(&store, &config).await.unwrap_err();
        assert!(matches!(
            err,
            GameLaunchError::DownloadError(DownloadError::VersionNotFoundInManifest(_))
        ));
        assert!(!store.layout().launch_args_file().exists());
    }
}
