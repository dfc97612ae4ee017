//! Icon downloads. Disabled unless requested; failures are logged and never
//! fail the owning data category.

use std::path::Path;

use crate::error::CliError;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:95.0) Gecko/20100101 Firefox/95.0";

pub struct IconFetcher {
    enabled: bool,
    http: reqwest::blocking::Client,
}

impl IconFetcher {
    pub fn new(enabled: bool) -> Result<Self, CliError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { enabled, http })
    }

    /// Fetch `url` into `destination` unless it is already there.
    pub fn fetch(&self, url: &str, destination: &Path) {
        if !self.enabled || url.is_empty() {
            return;
        }
        if destination.exists() {
            return;
        }
        if let Err(err) = self.download(url, destination) {
            tracing::warn!(url, path = %destination.display(), error = %err, "icon download failed");
        }
    }

    fn download(&self, url: &str, destination: &Path) -> Result<(), CliError> {
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CliError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        tracing::info!(path = %destination.display(), "downloading icon");
        let bytes = self.http.get(url).send()?.error_for_status()?.bytes()?;
        std::fs::write(destination, &bytes).map_err(|source| CliError::Io {
            path: destination.to_path_buf(),
            source,
        })
    }
}
