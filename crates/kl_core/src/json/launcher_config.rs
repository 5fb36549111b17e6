use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DownloadError, IntoIoError, IntoJsonError};

/// Optional settings read from `<store>/config.json`.
///
/// Every field may be left out; command-line flags
/// take priority over anything set here.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct LauncherConfigJson {
    /// Path to the `java` executable to launch the game with.
    pub java_override: Option<String>,
    /// The amount of RAM in megabytes the game should have.
    pub ram_in_mb: Option<usize>,
    /// Additional arguments to pass to Java.
    pub java_args: Option<Vec<String>>,
    /// Additional arguments to pass to the game.
    pub game_args: Option<Vec<String>>,
    /// Alternative version catalog URL (mirrors).
    pub manifest_url: Option<String>,
    /// Alternative asset CDN base URL (mirrors).
    pub resources_url: Option<String>,
}

impl LauncherConfigJson {
    /// Reads the config file, or returns the default
    /// config if there is no file.
    ///
    /// # Errors
    /// If the file exists but can't be read or parsed.
    pub async fn read(path: &Path) -> Result<Self, DownloadError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = tokio::fs::read_to_string(path).await.path(path)?;
        Ok(serde_json::from_str(&text).json(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LauncherConfigJson::read(&dir.path().join("config.json"))
            .await
            .unwrap();
        assert!(config.java_override.is_none());
        assert!(config.ram_in_mb.is_none());
    }

    #[tokio::test]
    async fn partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "ram_in_mb": 4096, "java_args": ["-Dfoo=bar"] }"#).unwrap();

        let config = LauncherConfigJson::read(&path).await.unwrap();
        assert_eq!(config.ram_in_mb, Some(4096));
        assert_eq!(config.java_args, Some(vec!["-Dfoo=bar".to_owned()]));
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ ram_in_mb: ").unwrap();

        assert!(matches!(
            LauncherConfigJson::read(&path).await,
            Err(DownloadError::Json(_))
        ));
    }
}
