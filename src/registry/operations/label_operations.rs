//! Label creation with lookup of existing labels

use crate::error::{RegistryError, Result};
use crate::logging::Logger;
use crate::registry::models::{CreateLabelRequest, Label, ListModuleLabelsRequest};
use crate::registry::transport::RegistryTransport;
use std::sync::Arc;

#[derive(Clone)]
pub struct LabelOperations {
    transport: Arc<dyn RegistryTransport>,
    output: Logger,
}

impl LabelOperations {
    pub fn new(transport: Arc<dyn RegistryTransport>, output: Logger) -> Self {
        Self { transport, output }
    }

    /// Label `commit_id` with `tag` and return the label id.
    ///
    /// A taken name resolves to the existing label. Failing to find it is only
    /// a warning and yields `Ok(None)`; every other error is returned.
    pub async fn create_and_resolve(
        &self,
        module_id: &str,
        commit_id: &str,
        tag: &str,
    ) -> Result<Option<String>> {
        self.output
            .step(&format!("Creating label {} on commit {}", tag, commit_id));

        let request = CreateLabelRequest {
            module_id: module_id.to_string(),
            commit_id: commit_id.to_string(),
            name: tag.to_string(),
        };

        match self.transport.create_label(&request).await {
            Ok(response) => {
                let label_id = response.label.map(|l| l.id).unwrap_or_default();
                if label_id.is_empty() {
                    self.output.warning(&format!(
                        "Label {} was created for module {} but the response carried no label ID",
                        tag, module_id
                    ));
                    return Ok(None);
                }
                self.output.success(&format!(
                    "Successfully created label for module {}: {} ({})",
                    module_id, tag, label_id
                ));
                Ok(Some(label_id))
            }
            Err(e) if e.is_already_exists() => {
                self.output
                    .info(&format!("Label {} already exists, looking it up", tag));
                match self.find_label(module_id, tag).await {
                    Ok(label) => Ok(Some(label.id)),
                    Err(e) => {
                        self.output
                            .warning(&format!("Failed to get latest module label ID: {}", e));
                        Ok(None)
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Find the label of a module carrying the given name
    pub async fn find_label(&self, module_id: &str, tag: &str) -> Result<Label> {
        let response = self
            .transport
            .list_module_labels(&ListModuleLabelsRequest {
                module_ids: vec![module_id.to_string()],
            })
            .await?;

        if response.labels.is_empty() {
            return Err(RegistryError::NotFound(format!(
                "no labels found for module {}",
                module_id
            )));
        }

        let label = find_by_name(response.labels, tag).ok_or_else(|| {
            RegistryError::NotFound(format!(
                "no label found for module {} with tag {}",
                module_id, tag
            ))
        })?;

        let created_at = label
            .create_time
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string());
        self.output.info(&format!(
            "Found label for module {} with tag {}: id={}, commit_id={}, created_by={}, created_at={}",
            module_id, label.name, label.id, label.commit_id, label.created_by_user_id, created_at
        ));

        Ok(label)
    }
}

fn find_by_name(labels: Vec<Label>, tag: &str) -> Option<Label> {
    labels.into_iter().find(|label| label.name == tag)
}
