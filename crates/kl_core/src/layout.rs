use std::path::{Path, PathBuf};

/// Where everything lives inside the store root.
///
/// ```txt
/// <root>/
///     versions/<id>.json
///     versions/<id>.jar
///     libraries/<artifact path>
///     natives/<id>/...
///     assets/indexes/<index id>.json
///     assets/objects/<xx>/<hash>
///     game/
///     logs/
///     config.json
///     launch_args.txt
/// ```
#[derive(Debug, Clone)]
pub struct StoreLayout {
    root: PathBuf,
}

impl StoreLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Working directory of the game process: the store's parent.
    /// Falls back to the root itself if it has no parent.
    #[must_use]
    pub fn work_dir(&self) -> &Path {
        self.root.parent().unwrap_or(&self.root)
    }

    #[must_use]
    pub fn version_json(&self, version_id: &str) -> PathBuf {
        self.root.join("versions").join(format!("{version_id}.json"))
    }

    #[must_use]
    pub fn version_jar(&self, version_id: &str) -> PathBuf {
        self.root.join("versions").join(format!("{version_id}.jar"))
    }

    #[must_use]
    pub fn libraries_dir(&self) -> PathBuf {
        self.root.join("libraries")
    }

    /// `relative_path` is the `path` field of a library
    /// artifact, always `/`-separated.
    #[must_use]
    pub fn library(&self, relative_path: &str) -> PathBuf {
        relative_path
            .split('/')
            .filter(|n| !n.is_empty())
            .fold(self.libraries_dir(), |path, part| path.join(part))
    }

    #[must_use]
    pub fn natives_dir(&self, version_id: &str) -> PathBuf {
        self.root.join("natives").join(version_id)
    }

    #[must_use]
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    #[must_use]
    pub fn asset_index(&self, index_id: &str) -> PathBuf {
        self.assets_dir()
            .join("indexes")
            .join(format!("{index_id}.json"))
    }

    /// `objects/<first two hex chars>/<full hash>`
    #[must_use]
    pub fn asset_object(&self, hash: &str) -> PathBuf {
        self.assets_dir()
            .join("objects")
            .join(hash_prefix(hash))
            .join(hash)
    }

    #[must_use]
    pub fn game_dir(&self) -> PathBuf {
        self.root.join("game")
    }

    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    #[must_use]
    pub fn config_json(&self) -> PathBuf {
        self.root.join("config.json")
    }

    #[must_use]
    pub fn launch_args_file(&self) -> PathBuf {
        self.root.join("launch_args.txt")
    }
}

/// First two characters of a hex hash (the whole
/// string if shorter), used as the bucket directory.
#[must_use]
pub fn hash_prefix(hash: &str) -> &str {
    hash.get(..2).unwrap_or(hash)
}
