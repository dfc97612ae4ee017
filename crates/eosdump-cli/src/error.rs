//! Error type for the collaborator layer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// A required configuration field is absent; fatal, reported by name.
    #[error("dumper param missing: {name}")]
    MissingParam { name: &'static str },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Epic web login flow failed; the message names the step.
    #[error("login failed: {0}")]
    Login(String),

    #[error(transparent)]
    Sdk(#[from] eosdump_sdk::SdkError),
}
