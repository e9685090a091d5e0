use super::{lenient_u64, null_as_default, BoundingBox, PaginationStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    None,
    WaitingForReceiving,
    WaitingForPreprocessing,
    Preprocessing,
    WaitingForConversion,
    Converting,
    WaitingForProcessing,
    Processing,
    Succeeded,
    Failed,
    Invalid,
    /// A status this SDK does not know.
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether the job will not change state anymore.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed | JobStatus::Invalid)
    }
}

/// Content type of a submitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl ContentType {
    /// The MIME type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Pdf => "application/pdf",
            ContentType::Png => "image/png",
            ContentType::Jpeg => "image/jpeg",
        }
    }
}

/// The document a job was submitted with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceDocument {
    pub name: String,
    pub content_type: String,
    /// Size in bytes.
    #[serde(deserialize_with = "lenient_u64")]
    pub size: u64,
}

/// A job extracting field values from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractionJob {
    pub id: String,
    pub user_id: String,
    /// Document model used for the extraction.
    pub document_id: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub document_version: u64,
    pub status: JobStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
    pub source_document: SourceDocument,
    pub created_at: String,
    pub updated_at: String,
}

/// A page of extraction jobs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginatedExtractionJobs {
    pub jobs: Vec<ExtractionJob>,
    pub pagination_status: PaginationStatus,
}

/// Result of matching a value against a data type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatatypeMatch {
    pub name: String,
    #[serde(rename = "match")]
    pub matched: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub capture: Vec<String>,
}

/// Values extracted for a single-value field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractionJobElementField {
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<String>,
    /// Matches keyed by data type ID.
    #[serde(deserialize_with = "null_as_default")]
    pub datatypes_matches: BTreeMap<String, DatatypeMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractionJobTableColumnField {
    pub id: String,
    pub datafield_id: String,
}

/// One cell of an extracted table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractionJobTableRowColumnField {
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub datatypes_matches: BTreeMap<String, DatatypeMatch>,
    #[serde(rename = "box")]
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractionJobTableRowField {
    #[serde(deserialize_with = "null_as_default")]
    pub columns: Vec<ExtractionJobTableRowColumnField>,
}

/// Values extracted for a table field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractionJobTableField {
    pub main_column_datafield_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub columns: Vec<ExtractionJobTableColumnField>,
    #[serde(deserialize_with = "null_as_default")]
    pub rows: Vec<ExtractionJobTableRowField>,
}

/// An extracted field and where it was found.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractionJobField {
    pub field_id: String,
    pub name: String,
    pub anchor: BoundingBox,
    pub gather_box: BoundingBox,
    pub element: Option<ExtractionJobElementField>,
    pub table: Option<ExtractionJobTableField>,
}

/// Output of a finished extraction job.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractionJobOutput {
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<ExtractionJobField>,
    #[serde(deserialize_with = "null_as_default")]
    pub stoppers: Vec<BoundingBox>,
}

/// Request to extract a document with a document model.
#[derive(Debug, Clone, Serialize)]
pub struct CreateExtractionJobRequest {
    /// Document model ID.
    pub document_id: String,
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
}

/// Values to render into one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderingJobField {
    pub field_id: String,
    pub values: Vec<String>,
}

/// Request to render values into a document model.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRenderingJobRequest {
    pub document_id: String,
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_datatypes: Option<bool>,
    pub font_size: u32,
    pub fields: Vec<RenderingJobField>,
}

/// A job accepted by the service, with the presigned URL to upload its document to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreatedJob {
    pub id: String,
    pub document_name: String,
    pub url: String,
    pub content_type: String,
    pub expiry: String,
}

/// A presigned document URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentUrl {
    pub url: String,
    pub content_type: String,
    pub expiry: String,
}

/// A job rendering values into a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderingJob {
    pub id: String,
    pub user_id: String,
    pub document_id: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub document_version: u64,
    pub status: JobStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// A page of rendering jobs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginatedRenderingJobs {
    pub jobs: Vec<RenderingJob>,
    pub pagination_status: PaginationStatus,
}
