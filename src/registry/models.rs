//! Wire records for the module registry procedures
//!
//! Messages use the protobuf JSON mapping: lowerCamelCase names, base64 bytes,
//! RFC 3339 timestamps, and default values omitted from responses.

use crate::archive::ArchiveFormat;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Commit {
    pub id: String,
    pub module_id: String,
    pub create_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub commit_id: String,
    pub created_by_user_id: String,
    pub create_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadArchiveRequest {
    pub module_id: String,
    #[serde(serialize_with = "serialize_base64")]
    pub archive_content: Vec<u8>,
    pub format: ArchiveFormat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadArchiveResponse {
    pub commit: Option<Commit>,
    #[serde(deserialize_with = "deserialize_flexible_u64")]
    pub extracted_files_count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModuleCommitsRequest {
    pub module_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListModuleCommitsResponse {
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabelRequest {
    pub module_id: String,
    pub commit_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateLabelResponse {
    pub label: Option<Label>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModuleLabelsRequest {
    pub module_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListModuleLabelsResponse {
    pub labels: Vec<Label>,
}

fn serialize_base64<T: AsRef<[u8]>, S: Serializer>(bytes: T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

// 64-bit integers are strings in protobuf JSON, 32-bit ones are numbers
fn deserialize_flexible_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
