//! Publish runner: upload the archive, then label the commit

use crate::archive::ModuleArchive;
use crate::cli::args::Args;
use crate::cli::config::{AuthConfig, RegistryConfig};
use crate::error::Result;
use crate::logging::Logger;
use crate::registry::{
    LabelOperations, RegistryClientBuilder, RegistryTransport, UploadOperations,
};
use std::path::Path;
use std::sync::Arc;

/// What a publish run resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub commit_id: String,
    /// `None` when the label already existed but could not be looked up
    pub label_id: Option<String>,
    /// `None` when the archive had been uploaded before
    pub extracted_files: Option<u64>,
}

pub struct Runner {
    args: Args,
    output: Logger,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let output = if args.quiet {
            Logger::new_quiet()
        } else {
            Logger::new(args.verbose)
        };

        Self { args, output }
    }

    pub fn logger(&self) -> &Logger {
        &self.output
    }

    pub async fn run(&self) -> Result<PublishOutcome> {
        self.output.section("Module Registry Pusher");

        let (registry_config, auth_config) = self.validate_arguments()?;

        // The archive is read before any remote call is made
        let archive = self.load_archive().await?;

        let transport = self.create_transport(&registry_config, auth_config)?;
        self.publish(transport, &archive).await
    }

    /// Run both steps against an already built transport
    pub async fn publish(
        &self,
        transport: Arc<dyn RegistryTransport>,
        archive: &ModuleArchive,
    ) -> Result<PublishOutcome> {
        let upload = UploadOperations::new(transport.clone(), self.output.clone());
        let uploaded = upload.upload_and_resolve(archive).await?;

        let labels = LabelOperations::new(transport, self.output.clone());
        let label_id = labels
            .create_and_resolve(&archive.module_id, &uploaded.commit_id, &self.args.tag)
            .await?;

        let outcome = PublishOutcome {
            commit_id: uploaded.commit_id,
            label_id,
            extracted_files: uploaded.extracted_files,
        };

        self.output.summary_kv(
            "Publish summary",
            &[
                ("Module", archive.module_id.clone()),
                ("Tag", self.args.tag.clone()),
                ("Commit", outcome.commit_id.clone()),
                (
                    "Label",
                    outcome.label_id.clone().unwrap_or_else(|| "unresolved".to_string()),
                ),
                ("Elapsed", self.output.format_duration(self.output.elapsed())),
            ],
        );

        Ok(outcome)
    }

    fn validate_arguments(&self) -> Result<(RegistryConfig, AuthConfig)> {
        let registry_config =
            RegistryConfig::new(self.args.endpoint().to_string()).with_timeout(self.args.timeout());
        registry_config.validate()?;

        let auth_config = AuthConfig::new(
            self.args.basic_auth_user.clone(),
            self.args.basic_auth_password.clone(),
        );
        auth_config.validate()?;

        self.output
            .verbose(&format!("Registry endpoint: {}", registry_config.address));
        self.output
            .verbose(&format!("Authenticating as: {}", auth_config.username));
        Ok((registry_config, auth_config))
    }

    async fn load_archive(&self) -> Result<ModuleArchive> {
        let path = Path::new(&self.args.zip_file);
        let archive = ModuleArchive::from_file(&self.args.module_id, path).await?;

        self.output.info(&format!(
            "Archive: {} ({})",
            path.display(),
            self.output.format_size(archive.size())
        ));
        self.output.detail(&format!("Digest: {}", archive.digest()));

        if !archive.looks_like_zip() {
            self.output.warning(&format!(
                "{} does not start with a zip signature; the registry may reject it",
                path.display()
            ));
        }

        Ok(archive)
    }

    fn create_transport(
        &self,
        registry_config: &RegistryConfig,
        auth_config: AuthConfig,
    ) -> Result<Arc<dyn RegistryTransport>> {
        let client = RegistryClientBuilder::from_config(registry_config)
            .with_auth(Some(auth_config))
            .with_logger(self.output.clone())
            .build()?;
        Ok(Arc::new(client))
    }
}
