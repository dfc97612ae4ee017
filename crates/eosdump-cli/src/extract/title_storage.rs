//! Requested title-storage files → `titlestorage/<name>`.

use std::path::Path;

use eosdump_sdk::{Platform, WaitPolicy};

use crate::error::CliError;

const STORAGE_DIR: &str = "titlestorage";

pub fn dump(
    platform: &Platform<'_>,
    root: &Path,
    files: &[String],
    policy: &WaitPolicy,
) -> Result<(), CliError> {
    if files.is_empty() {
        return Ok(());
    }

    let storage = platform.title_storage();
    if !storage.is_available() {
        tracing::debug!("title storage not available, skipping");
        return Ok(());
    }

    for filename in files {
        if let Err(err) = download(platform, filename, root, policy) {
            tracing::error!(filename, error = %err, "title storage download failed");
        }
    }
    Ok(())
}

fn download(
    platform: &Platform<'_>,
    filename: &str,
    root: &Path,
    policy: &WaitPolicy,
) -> Result<(), CliError> {
    let storage = platform.title_storage();
    let user = platform.connect().logged_in_user(0);

    storage.query_file(user, filename, policy)?;
    let bytes = storage.read_file(user, filename, policy)?;

    let destination = root.join(STORAGE_DIR).join(filename);
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|source| CliError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    tracing::info!(filename, size = bytes.len(), "title storage file saved");
    std::fs::write(&destination, &bytes).map_err(|source| CliError::Io {
        path: destination,
        source,
    })
}
