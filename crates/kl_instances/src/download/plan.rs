use std::path::PathBuf;

use kl_core::{
    json::{AssetIndexMap, VersionDetails},
    ContentItem, Platform, StoreLayout,
};

/// One file contributed by a library entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryItem {
    /// Downloaded and put on the classpath.
    Classpath(ContentItem),
    /// Downloaded, but a rule keeps it off the classpath.
    Excluded(ContentItem),
    /// Native bundle, extracted into the natives directory.
    Native(ContentItem),
}

impl LibraryItem {
    #[must_use]
    pub fn item(&self) -> &ContentItem {
        match self {
            LibraryItem::Classpath(n) | LibraryItem::Excluded(n) | LibraryItem::Native(n) => n,
        }
    }
}

/// Every file a version needs before its asset
/// index is known, in download order.
#[derive(Debug, Clone)]
pub struct ArtifactPlan {
    pub client: ContentItem,
    /// In library order; a library's artifact
    /// comes right before its native bundle.
    pub libraries: Vec<LibraryItem>,
    pub asset_index: ContentItem,
    pub natives_dir: PathBuf,
}

impl ArtifactPlan {
    /// Walks the version details and decides what to fetch where.
    /// Doesn't touch the disk or network.
    #[must_use]
    pub fn new(version: &VersionDetails, layout: &StoreLayout, platform: Option<Platform>) -> Self {
        let client = ContentItem::verified(
            &version.downloads.client.url,
            layout.version_jar(&version.id),
            &version.downloads.client.sha1,
        );

        let mut libraries = Vec::new();
        for library in &version.libraries {
            let Some(downloads) = &library.downloads else {
                continue;
            };

            if let Some(artifact) = &downloads.artifact {
                let item = ContentItem::verified(
                    &artifact.url,
                    layout.library(&artifact.path),
                    &artifact.sha1,
                );
                libraries.push(if library.is_allowed() {
                    LibraryItem::Classpath(item)
                } else {
                    LibraryItem::Excluded(item)
                });
            }

            if let Some(native) = library.native_classifier(platform) {
                libraries.push(LibraryItem::Native(ContentItem::verified(
                    &native.url,
                    layout.library(&native.path),
                    &native.sha1,
                )));
            }
        }

        let index = &version.assetIndex;
        let asset_index =
            ContentItem::verified(&index.url, layout.asset_index(&index.id), &index.sha1);

        Self {
            client,
            libraries,
            asset_index,
            natives_dir: layout.natives_dir(&version.id),
        }
    }

    pub fn classpath_items(&self) -> impl Iterator<Item = &ContentItem> {
        self.libraries.iter().filter_map(|n| match n {
            LibraryItem::Classpath(item) => Some(item),
            _ => None,
        })
    }

    pub fn native_items(&self) -> impl Iterator<Item = &ContentItem> {
        self.libraries.iter().filter_map(|n| match n {
            LibraryItem::Native(item) => Some(item),
            _ => None,
        })
    }
}

/// One store item per object in the index. Nothing is
/// filtered; the store skips objects that are already there.
#[must_use]
pub fn plan_assets(
    index: &AssetIndexMap,
    layout: &StoreLayout,
    resources_url: &str,
) -> Vec<ContentItem> {
    index
        .objects
        .values()
        .map(|obj| obj.content_item(layout, resources_url))
        .collect()
}
