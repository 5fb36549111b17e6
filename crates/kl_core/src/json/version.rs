use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Platform;

/// Used when a version document doesn't name its main class.
pub const DEFAULT_MAIN_CLASS: &str = "net.minecraft.client.main.Main";

/// The details document of one version
/// (`versions/<id>.json` in the store).
#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VersionDetails {
    /// Name of the version.
    pub id: String,
    /// An index/list of assets (music/sounds) to be downloaded.
    pub assetIndex: AssetIndex,
    /// Where to download the client jar.
    pub downloads: Downloads,
    /// Library dependencies of the version that need to be downloaded.
    #[serde(default)]
    pub libraries: Vec<Library>,
    /// Which is the main class in the jar that has the main function.
    pub mainClass: Option<String>,
}

impl VersionDetails {
    #[must_use]
    pub fn main_class(&self) -> &str {
        self.mainClass.as_deref().unwrap_or(DEFAULT_MAIN_CLASS)
    }
}

#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssetIndex {
    pub id: String,
    pub sha1: String,
    pub url: String,
    pub size: Option<usize>,
    pub totalSize: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Downloads {
    pub client: Download,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Download {
    pub sha1: String,
    pub size: Option<usize>,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Library {
    pub name: Option<String>,
    pub downloads: Option<LibraryDownloads>,
    pub rules: Option<Vec<LibraryRule>>,
    /// OS name -> classifier holding that OS's natives,
    /// for example `"linux": "natives-linux"`.
    pub natives: Option<BTreeMap<String, String>>,
}

impl Library {
    /// Whether the library goes on the classpath.
    ///
    /// Any `disallow` rule excludes it, whatever OS the rule
    /// names; a library without rules (or with only `allow`
    /// rules) is always included.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.rules
            .iter()
            .flatten()
            .all(|rule| rule.action != RuleAction::Disallow)
    }

    /// Picks the classifier holding natives for `platform`, if any.
    ///
    /// A `natives` map on the library wins (with `${arch}` filled in),
    /// otherwise the platform's fixed classifier name is looked up.
    #[must_use]
    pub fn native_classifier(&self, platform: Option<Platform>) -> Option<&LibraryClassifier> {
        let platform = platform?;
        let classifiers = self.downloads.as_ref()?.classifiers.as_ref()?;

        let from_map = self.natives.as_ref().and_then(|natives| {
            natives
                .iter()
                .find(|(os, _)| platform.matches_os_name(os))
                .map(|(_, name)| name.replace("${arch}", ARCH_BITS))
        });

        match from_map {
            Some(name) => classifiers.get(&name),
            None => classifiers.get(platform.native_classifier()),
        }
    }
}

const ARCH_BITS: &str = if cfg!(target_pointer_width = "32") {
    "32"
} else {
    "64"
};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LibraryDownloads {
    pub artifact: Option<LibraryDownloadArtifact>,
    pub classifiers: Option<BTreeMap<String, LibraryClassifier>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LibraryDownloadArtifact {
    pub path: String,
    pub sha1: String,
    pub size: Option<usize>,
    pub url: String,
}

/// Same shape as an artifact, just found under `classifiers`.
pub type LibraryClassifier = LibraryDownloadArtifact;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LibraryRule {
    pub action: RuleAction,
    pub os: Option<LibraryRuleOS>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Disallow,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LibraryRuleOS {
    pub name: Option<String>,
    pub version: Option<String>, // Regex
    pub arch: Option<String>,
}
