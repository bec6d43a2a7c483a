//! Archive upload with commit resolution
//!
//! Uploading content the registry already holds is reported as `already_exists`.
//! In that case the commit is recovered from the module's commit history instead.

use crate::archive::ModuleArchive;
use crate::error::{RegistryError, Result};
use crate::logging::Logger;
use crate::registry::models::{Commit, ListModuleCommitsRequest, UploadArchiveRequest};
use crate::registry::transport::RegistryTransport;
use std::sync::Arc;

/// Result of the upload step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub commit_id: String,
    /// Only known when the upload created a new commit
    pub extracted_files: Option<u64>,
}

#[derive(Clone)]
pub struct UploadOperations {
    transport: Arc<dyn RegistryTransport>,
    output: Logger,
}

impl UploadOperations {
    pub fn new(transport: Arc<dyn RegistryTransport>, output: Logger) -> Self {
        Self { transport, output }
    }

    /// Upload the archive and resolve the commit it maps to
    pub async fn upload_and_resolve(&self, archive: &ModuleArchive) -> Result<UploadOutcome> {
        self.output.step(&format!(
            "Uploading archive for module {} ({})",
            archive.module_id,
            self.output.format_size(archive.size())
        ));

        let request = UploadArchiveRequest {
            module_id: archive.module_id.clone(),
            archive_content: archive.content.clone(),
            format: archive.format,
        };

        let outcome = match self.transport.upload_archive(&request).await {
            Ok(response) => {
                let commit_id = response.commit.map(|c| c.id).unwrap_or_default();
                self.output.success(&format!(
                    "Successfully uploaded archive. Extracted {} files.",
                    response.extracted_files_count
                ));
                UploadOutcome {
                    commit_id,
                    extracted_files: Some(response.extracted_files_count),
                }
            }
            Err(e) if e.is_already_exists() => {
                self.output
                    .info(&format!("Archive already uploaded ({}), resolving latest commit", e));
                let commit_id = self
                    .latest_commit_id(&archive.module_id)
                    .await
                    .map_err(|e| e.context("Failed to get latest module commit ID"))?;
                UploadOutcome {
                    commit_id,
                    extracted_files: None,
                }
            }
            Err(e) => return Err(e),
        };

        if outcome.commit_id.is_empty() {
            return Err(RegistryError::NotFound(
                "Failed to get commit ID from response".to_string(),
            ));
        }

        Ok(outcome)
    }

    /// Id of the most recently created commit of a module
    pub async fn latest_commit_id(&self, module_id: &str) -> Result<String> {
        let response = self
            .transport
            .list_module_commits(&ListModuleCommitsRequest {
                module_ids: vec![module_id.to_string()],
            })
            .await?;

        self.output.detail(&format!(
            "Module {} has {} commits",
            module_id,
            response.commits.len()
        ));

        let latest = latest_commit(response.commits).ok_or_else(|| {
            RegistryError::NotFound(format!("no commits found for module {}", module_id))
        })?;

        self.output
            .info(&format!("Latest commit for module {}: {}", module_id, latest.id));
        Ok(latest.id)
    }
}

/// Newest commit by creation time; commits without a timestamp rank last
pub fn latest_commit(mut commits: Vec<Commit>) -> Option<Commit> {
    commits.sort_by(|a, b| b.create_time.cmp(&a.create_time));
    commits.into_iter().next()
}
