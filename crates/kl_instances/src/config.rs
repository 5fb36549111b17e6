use std::path::PathBuf;

use kl_core::{json::LauncherConfigJson, Platform};

use crate::download::constants::{
    DEFAULT_JAVA, DEFAULT_MANIFEST_URL, DEFAULT_RAM_MB, DEFAULT_USERNAME, DEFAULT_VERSION,
    OBJECTS_URL,
};

/// Everything one run needs to know, decided up front
/// and passed down explicitly.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// The store root (`launcher_data`).
    pub root: PathBuf,
    pub java: PathBuf,
    pub ram_in_mb: usize,
    pub version: String,
    pub username: String,
    pub manifest_url: String,
    pub resources_url: String,
    pub java_args: Vec<String>,
    pub game_args: Vec<String>,
    /// Decides rules and natives. `None` for
    /// unsupported systems (natives get skipped).
    pub platform: Option<Platform>,
}

impl LaunchConfig {
    /// Default settings for a store at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            java: PathBuf::from(DEFAULT_JAVA),
            ram_in_mb: DEFAULT_RAM_MB,
            version: DEFAULT_VERSION.to_owned(),
            username: DEFAULT_USERNAME.to_owned(),
            manifest_url: DEFAULT_MANIFEST_URL.to_owned(),
            resources_url: OBJECTS_URL.to_owned(),
            java_args: Vec::new(),
            game_args: Vec::new(),
            platform: Platform::current(),
        }
    }

    /// Overrides defaults with whatever `config.json` sets.
    pub fn apply_json(&mut self, json: LauncherConfigJson) {
        if let Some(java) = json.java_override {
            self.java = PathBuf::from(java);
        }
        if let Some(ram) = json.ram_in_mb {
            self.ram_in_mb = ram;
        }
        if let Some(url) = json.manifest_url {
            self.manifest_url = url;
        }
        if let Some(url) = json.resources_url {
            self.resources_url = url;
        }
        self.java_args.extend(json.java_args.unwrap_or_default());
        self.game_args.extend(json.game_args.unwrap_or_default());
    }

    /// `-Xmx` argument for the configured amount of RAM.
    #[must_use]
    pub fn ram_argument(&self) -> String {
        format!("-Xmx{}M", self.ram_in_mb)
    }
}
