pub mod asset_index;
pub mod launcher_config;
pub mod manifest;
pub mod version;

pub use asset_index::{AssetIndexMap, AssetObject};
pub use launcher_config::LauncherConfigJson;
pub use manifest::Manifest;
pub use version::VersionDetails;
