//! Registry operations module
//!
//! The two steps of a publish run, each wrapping one creating procedure with its
//! lookup fallback.

pub mod label_operations;
pub mod upload_operations;

pub use label_operations::LabelOperations;
pub use upload_operations::{UploadOperations, UploadOutcome, latest_commit};

#[cfg(test)]
pub(crate) mod testing {
    use crate::error::{RegistryError, Result, RpcCode};
    use crate::registry::models::{
        Commit, CreateLabelRequest, CreateLabelResponse, Label, ListModuleCommitsRequest,
        ListModuleCommitsResponse, ListModuleLabelsRequest, ListModuleLabelsResponse,
        UploadArchiveRequest, UploadArchiveResponse,
    };
    use crate::registry::transport::RegistryTransport;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory registry recording which procedures were called
    #[derive(Default)]
    pub struct FakeRegistry {
        upload_commit: Option<(String, u64)>,
        upload_error: Option<RpcCode>,
        commits: Vec<Commit>,
        commits_error: Option<RpcCode>,
        created_label: Option<String>,
        label_error: Option<RpcCode>,
        labels: Vec<Label>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl FakeRegistry {
        pub fn with_upload_commit(mut self, id: &str, files: u64) -> Self {
            self.upload_commit = Some((id.to_string(), files));
            self
        }

        pub fn with_upload_error(mut self, code: RpcCode) -> Self {
            self.upload_error = Some(code);
            self
        }

        pub fn with_commits(mut self, commits: Vec<Commit>) -> Self {
            self.commits = commits;
            self
        }

        pub fn with_commits_error(mut self, code: RpcCode) -> Self {
            self.commits_error = Some(code);
            self
        }

        pub fn with_created_label(mut self, id: &str) -> Self {
            self.created_label = Some(id.to_string());
            self
        }

        pub fn with_label_error(mut self, code: RpcCode) -> Self {
            self.label_error = Some(code);
            self
        }

        pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
            self.labels = labels;
            self
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, procedure: &'static str) {
            self.calls.lock().unwrap().push(procedure);
        }

        fn fail(code: RpcCode) -> RegistryError {
            RegistryError::rpc(code, format!("fake {}", code))
        }
    }

    #[async_trait]
    impl RegistryTransport for FakeRegistry {
        async fn upload_archive(&self, _request: &UploadArchiveRequest) -> Result<UploadArchiveResponse> {
            self.record("UploadArchive");
            if let Some(code) = self.upload_error {
                return Err(Self::fail(code));
            }
            let (id, files) = self.upload_commit.clone().unwrap_or_default();
            Ok(UploadArchiveResponse {
                commit: Some(Commit {
                    id,
                    ..Commit::default()
                }),
                extracted_files_count: files,
            })
        }

        async fn list_module_commits(
            &self,
            _request: &ListModuleCommitsRequest,
        ) -> Result<ListModuleCommitsResponse> {
            self.record("ListModuleCommits");
            if let Some(code) = self.commits_error {
                return Err(Self::fail(code));
            }
            Ok(ListModuleCommitsResponse {
                commits: self.commits.clone(),
            })
        }

        async fn create_label(&self, request: &CreateLabelRequest) -> Result<CreateLabelResponse> {
            self.record("CreateLabel");
            if let Some(code) = self.label_error {
                return Err(Self::fail(code));
            }
            Ok(CreateLabelResponse {
                label: Some(Label {
                    id: self.created_label.clone().unwrap_or_default(),
                    name: request.name.clone(),
                    commit_id: request.commit_id.clone(),
                    ..Label::default()
                }),
            })
        }

        async fn list_module_labels(
            &self,
            _request: &ListModuleLabelsRequest,
        ) -> Result<ListModuleLabelsResponse> {
            self.record("ListModuleLabels");
            Ok(ListModuleLabelsResponse {
                labels: self.labels.clone(),
            })
        }
    }
}
