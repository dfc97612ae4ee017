//! Collaborator layer around `eosdump-sdk`: configuration, the Epic web
//! OAuth client, JSON persistence, icon downloads, and the per-category
//! extraction logic the `eosdump` binary drives.

pub mod config;
pub mod epic_web;
pub mod error;
pub mod extract;
pub mod icons;
pub mod logging;
pub mod store;

pub use error::CliError;
