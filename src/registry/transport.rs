//! Remote procedure surface of the module registry
//!
//! The registry exposes three Connect services. Everything this tool needs is
//! captured by [`RegistryTransport`], which the HTTP client implements and tests
//! can replace with an in-memory fake.

use crate::error::Result;
use crate::registry::models::{
    CreateLabelRequest, CreateLabelResponse, ListModuleCommitsRequest, ListModuleCommitsResponse,
    ListModuleLabelsRequest, ListModuleLabelsResponse, UploadArchiveRequest, UploadArchiveResponse,
};
use async_trait::async_trait;

pub const UPLOAD_SERVICE: &str = "registry.module.v1.UploadService";
pub const COMMIT_SERVICE: &str = "registry.module.v1.CommitService";
pub const LABEL_SERVICE: &str = "registry.module.v1.LabelService";

#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Submit an archive; fails with `already_exists` when the content is already committed
    async fn upload_archive(&self, request: &UploadArchiveRequest) -> Result<UploadArchiveResponse>;

    /// List commits of the given modules
    async fn list_module_commits(
        &self,
        request: &ListModuleCommitsRequest,
    ) -> Result<ListModuleCommitsResponse>;

    /// Create a named label on a commit; fails with `already_exists` for a taken name
    async fn create_label(&self, request: &CreateLabelRequest) -> Result<CreateLabelResponse>;

    /// List labels of the given modules
    async fn list_module_labels(
        &self,
        request: &ListModuleLabelsRequest,
    ) -> Result<ListModuleLabelsResponse>;
}
