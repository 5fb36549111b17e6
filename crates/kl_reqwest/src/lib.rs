//! Re-export of `reqwest` for the kindling crates.
//!
//! Every crate in the workspace goes through this one so the
//! TLS backend (rustls on Linux, native TLS elsewhere) and the
//! enabled features are decided in a single `Cargo.toml`.

pub use reqwest::*;
