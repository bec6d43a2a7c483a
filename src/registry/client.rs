// RegistryClient speaks the Connect protocol (unary calls, JSON codec) to the
// module registry. Every call is a POST to <endpoint>/<service>/<method> carrying
// the Basic Auth header installed at build time.

use crate::cli::config::{AuthConfig, RegistryConfig};
use crate::error::handlers::RpcErrorHandler;
use crate::error::{RegistryError, Result};
use crate::logging::Logger;
use crate::registry::auth::Auth;
use crate::registry::models::{
    CreateLabelRequest, CreateLabelResponse, ListModuleCommitsRequest, ListModuleCommitsResponse,
    ListModuleLabelsRequest, ListModuleLabelsResponse, UploadArchiveRequest, UploadArchiveResponse,
};
use crate::registry::transport::{COMMIT_SERVICE, LABEL_SERVICE, RegistryTransport, UPLOAD_SERVICE};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const CONNECT_PROTOCOL_VERSION: &str = "connect-protocol-version";

pub struct RegistryClientBuilder {
    address: String,
    auth_config: Option<AuthConfig>,
    timeout: Option<u64>,
    output: Logger,
}

impl RegistryClientBuilder {
    pub fn new(address: String) -> Self {
        Self {
            address,
            auth_config: None,
            timeout: None,
            output: Logger::new(false),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.address.clone()).with_timeout(config.timeout)
    }

    pub fn with_auth(mut self, auth_config: Option<AuthConfig>) -> Self {
        self.auth_config = auth_config;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_logger(mut self, output: Logger) -> Self {
        self.output = output;
        self
    }

    pub fn build(self) -> Result<RegistryClient> {
        let endpoint = url::Url::parse(&self.address)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CONNECT_PROTOCOL_VERSION, HeaderValue::from_static("1"));
        if let Some(auth_config) = &self.auth_config {
            Auth::from_config(auth_config).apply(&mut headers)?;
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| RegistryError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(RegistryClient {
            client,
            address: endpoint.as_str().trim_end_matches('/').to_string(),
            output: self.output,
        })
    }
}

pub struct RegistryClient {
    client: Client,
    address: String,
    output: Logger,
}

impl RegistryClient {
    pub fn builder(address: String) -> RegistryClientBuilder {
        RegistryClientBuilder::new(address)
    }

    pub fn procedure_url(&self, service: &str, method: &str) -> String {
        format!("{}/{}/{}", self.address, service, method)
    }

    async fn call<Req, Resp>(&self, service: &str, method: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned + Send,
    {
        let url = self.procedure_url(service, method);
        self.output.debug(&format!("POST {}", url));

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        self.output
            .debug(&format!("{} response status: {}", method, status));

        let body = response.text().await?;
        if !status.is_success() {
            return Err(RpcErrorHandler::handle_response_error(status, &body, method));
        }

        serde_json::from_str(&body).map_err(|e| {
            RegistryError::Parse(format!("Failed to decode {} response: {}", method, e))
        })
    }
}

#[async_trait]
impl RegistryTransport for RegistryClient {
    async fn upload_archive(&self, request: &UploadArchiveRequest) -> Result<UploadArchiveResponse> {
        self.call(UPLOAD_SERVICE, "UploadArchive", request).await
    }

    async fn list_module_commits(
        &self,
        request: &ListModuleCommitsRequest,
    ) -> Result<ListModuleCommitsResponse> {
        self.call(COMMIT_SERVICE, "ListModuleCommits", request).await
    }

    async fn create_label(&self, request: &CreateLabelRequest) -> Result<CreateLabelResponse> {
        self.call(LABEL_SERVICE, "CreateLabel", request).await
    }

    async fn list_module_labels(
        &self,
        request: &ListModuleLabelsRequest,
    ) -> Result<ListModuleLabelsResponse> {
        self.call(LABEL_SERVICE, "ListModuleLabels", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_url() {
        let client = RegistryClient::builder("https://modules.example.com/".to_string())
            .build()
            .unwrap();
        assert_eq!(
            client.procedure_url(UPLOAD_SERVICE, "UploadArchive"),
            "https://modules.example.com/registry.module.v1.UploadService/UploadArchive"
        );
    }

    #[test]
    fn test_procedure_url_keeps_base_path() {
        let client = RegistryClient::builder("http://localhost:8080/api".to_string())
            .build()
            .unwrap();
        assert_eq!(
            client.procedure_url(LABEL_SERVICE, "CreateLabel"),
            "http://localhost:8080/api/registry.module.v1.LabelService/CreateLabel"
        );
    }

    #[test]
    fn test_timeout_only_when_configured() {
        let config = RegistryConfig::new("https://modules.example.com".to_string());
        let builder = RegistryClientBuilder::from_config(&config);
        assert_eq!(builder.timeout, None);
        assert!(builder.build().is_ok());

        let builder = RegistryClientBuilder::from_config(&config.with_timeout(Some(30)));
        assert_eq!(builder.timeout, Some(30));
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_invalid_address_rejected() {
        let result = RegistryClient::builder("not a url".to_string()).build();
        assert!(matches!(result, Err(RegistryError::Validation(_))));
    }
}
