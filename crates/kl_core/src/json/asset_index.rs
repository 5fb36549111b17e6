use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{layout::hash_prefix, ContentItem, StoreLayout};

/// An asset index: logical asset name -> content hash.
///
/// Only the flat object map is understood; the
/// `virtual`/`map_to_resources` layouts are ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssetIndexMap {
    pub objects: BTreeMap<String, AssetObject>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssetObject {
    pub hash: String,
    pub size: u64,
}

impl AssetObject {
    /// `<resources_url>/<xx>/<hash>`
    #[must_use]
    pub fn url(&self, resources_url: &str) -> String {
        format!(
            "{}/{}/{}",
            resources_url.trim_end_matches('/'),
            hash_prefix(&self.hash),
            self.hash
        )
    }

    /// The object as a store item: content-addressed
    /// path, and the hash doubles as the checksum.
    #[must_use]
    pub fn content_item(&self, layout: &StoreLayout, resources_url: &str) -> ContentItem {
        ContentItem::verified(
            self.url(resources_url),
            layout.asset_object(&self.hash),
            &self.hash,
        )
    }
}
