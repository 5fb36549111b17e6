//! # Downloading and launching a Minecraft client
//!
//! The whole run is one straight line, one request at a time:
//!
//! 1. Resolve: fetch the version catalog, pick the exact
//!    version id, fetch (or reuse) its details document.
//! 2. Plan: turn the details into a list of files
//!    (client jar, libraries, natives, asset index).
//! 3. Fetch: run every planned file through the
//!    [`kl_core::ContentStore`], extract natives, then
//!    read the asset index and fetch every object in it.
//! 4. Assemble: build the JVM flags, classpath and game
//!    arguments, write them to an argument file and run Java.
//!
//! Any error anywhere stops the run.

mod config;
mod download;
mod launch;

pub use config::LaunchConfig;
pub use download::constants::{DEFAULT_JAVA, DEFAULT_MANIFEST_URL, DEFAULT_RAM_MB, OBJECTS_URL};
pub use download::plan::{plan_assets, ArtifactPlan, LibraryItem};
pub use download::{resolve_version, DownloadedGame, GameDownloader};
pub use launch::{
    censor, launch, prepare, resolve_java, run_game, write_argfile, GameLaunchError, Identity, LaunchPlan,
    PreparedLaunch,
};
