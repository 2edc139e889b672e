// SPDX-License-Identifier: GPL-3.0-only

//! Upload into a local directory

use super::{Upload, UploadMechanism, UploadOutcome};
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Writes each upload as a file in `dir`
#[derive(Debug, Clone)]
pub struct DirectoryUpload {
    dir: PathBuf,
}

impl DirectoryUpload {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl UploadMechanism for DirectoryUpload {
    fn submit(&self, upload: Upload) -> BoxFuture<'static, UploadOutcome> {
        let dir = self.dir.clone();

        Box::pin(async move {
            let path = dir.join(&upload.file_name);
            info!(path = %path.display(), size = upload.bytes.len(), "Saving upload");

            let result = async {
                tokio::fs::create_dir_all(&dir).await?;
                tokio::fs::write(&path, &upload.bytes[..]).await
            }
            .await;

            match result {
                Ok(()) => UploadOutcome::Success,
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to save upload");
                    UploadOutcome::Failure
                }
            }
        })
    }
}
