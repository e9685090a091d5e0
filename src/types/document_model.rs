use super::{lenient_u64, null_as_default, PaginationStatus};
use serde::{Deserialize, Serialize};

// === Geometry ===

/// Up to three extent values of a gather box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fst: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trd: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// A closed range on one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

/// A rectangle as one interval per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    pub x: Interval,
    pub y: Interval,
}

/// A table column in a document model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub label: String,
    pub width: f64,
}

/// A labelled region used to locate a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Anchor {
    pub orientation: String,
    #[serde(rename = "box")]
    pub bounding_box: BoundingBox,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
}

/// Where a field's value is read relative to its anchor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherBox {
    pub direction: String,
    pub extent: Extent,
}

// === Document model ===

/// Marker for single-value document fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModelElementField {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentModelTableField {
    #[serde(deserialize_with = "null_as_default")]
    pub columns: Vec<Column>,
}

/// A field placed on a document model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentModelField {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
    pub name: String,
    /// Data model field this field fills.
    #[serde(deserialize_with = "lenient_u64")]
    pub datamodel_field_id: u64,
    pub description: String,
    pub anchor: Anchor,
    pub gather_box: GatherBox,
    /// Set for single-value fields.
    pub element: Option<DocumentModelElementField>,
    /// Set for table fields.
    pub table: Option<DocumentModelTableField>,
}

/// Layout of a document kind, bound to a data model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentModel {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub version: u64,
    pub user_id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub datamodel_id: u64,
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<DocumentModelField>,
    /// Regions that end the document body.
    #[serde(deserialize_with = "null_as_default")]
    pub stoppers: Vec<Anchor>,
    pub preview_status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A page of document models.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginatedDocumentModels {
    pub models: Vec<DocumentModel>,
    pub pagination_status: PaginationStatus,
}

/// A field to add to a document model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDocumentModelFieldRequest {
    pub name: String,
    pub datamodel_field_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub anchor: Anchor,
    pub gather_box: GatherBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<DocumentModelElementField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<DocumentModelTableField>,
}

/// Replacement for an existing document model field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDocumentModelFieldRequest {
    pub id: u64,
    #[serde(flatten)]
    pub field: CreateDocumentModelFieldRequest,
}

/// Request to create a document model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDocumentModelRequest {
    pub datamodel_id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<CreateDocumentModelFieldRequest>,
}

/// Request to replace an existing document model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDocumentModelRequest {
    pub id: u64,
    pub datamodel_id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<UpdateDocumentModelFieldRequest>,
}

/// A presigned preview URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewUrl {
    pub url: String,
    pub expiry: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewUrls {
    #[serde(deserialize_with = "null_as_default")]
    pub preview_urls: Vec<PreviewUrl>,
}
