use super::{lenient_u64, lenient_u64_list, null_as_default, PaginationStatus};
use serde::{Deserialize, Serialize};

/// Shape of a data model field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// A single value.
    #[default]
    Element,
    /// Rows of values.
    Table,
    /// A kind this SDK does not know.
    #[serde(other)]
    Unsupported,
}

/// Key/value property attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Property {
    pub key: String,
    pub value: String,
}

/// Property in a field create or update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyRequest {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A data model field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Field {
    /// Field ID.
    #[serde(deserialize_with = "lenient_u64")]
    pub field_id: u64,
    /// Owner.
    pub user_id: String,
    pub kind: FieldKind,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub properties: Vec<Property>,
    /// IDs of the data types validating this field.
    #[serde(deserialize_with = "lenient_u64_list")]
    pub datatypes: Vec<u64>,
    pub created_at: String,
    pub updated_at: String,
}

/// A page of data model fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginatedFields {
    pub fields: Vec<Field>,
    pub pagination_status: PaginationStatus,
}

/// Request to create a field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateFieldRequest {
    pub kind: FieldKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyRequest>>,
    pub datatypes: Vec<u64>,
}

/// Request to replace an existing field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateFieldRequest {
    pub field_id: u64,
    pub kind: FieldKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyRequest>>,
    pub datatypes: Vec<u64>,
}

/// A data model: a named set of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataModel {
    /// Data model ID.
    #[serde(deserialize_with = "lenient_u64")]
    pub model_id: u64,
    pub user_id: String,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
    pub created_at: String,
    pub updated_at: String,
}

/// A page of data models.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginatedDataModels {
    pub models: Vec<DataModel>,
    pub pagination_status: PaginationStatus,
}

/// Request to create a data model from existing field IDs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDataModelRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<u64>,
}

/// Request to replace an existing data model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDataModelRequest {
    pub model_id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<u64>,
}

/// Document fields bound to one data model field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldLink {
    #[serde(deserialize_with = "lenient_u64")]
    pub datamodel_field_id: u64,
    #[serde(deserialize_with = "lenient_u64_list")]
    pub document_field_id: Vec<u64>,
}

/// A document model using a data model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentLink {
    #[serde(deserialize_with = "lenient_u64")]
    pub document_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<FieldLink>,
}

/// Document models using a data model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataModelLinks {
    #[serde(deserialize_with = "null_as_default")]
    pub document_links: Vec<DocumentLink>,
}

/// Data models using a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataFieldLinks {
    #[serde(deserialize_with = "lenient_u64_list")]
    pub model_ids: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_kinds() {
        let field: Field = serde_json::from_value(json!({
            "field_id": "7",
            "kind": "table",
            "properties": null,
            "datatypes": ["1", 2]
        }))
        .unwrap();
        assert_eq!(field.field_id, 7);
        assert_eq!(field.kind, FieldKind::Table);
        assert!(field.properties.is_empty());
        assert_eq!(field.datatypes, vec![1, 2]);

        let field: Field = serde_json::from_value(json!({"kind": "checkbox"})).unwrap();
        assert_eq!(field.kind, FieldKind::Unsupported);
    }

    #[test]
    fn test_data_model_links() {
        let links: DataModelLinks = serde_json::from_value(json!({
            "document_links": [
                {"document_id": "5", "fields": [{"datamodel_field_id": 1, "document_field_id": ["9"]}]},
                {"document_id": 6}
            ]
        }))
        .unwrap();
        assert_eq!(links.document_links.len(), 2);
        assert_eq!(links.document_links[0].fields[0].document_field_id, vec![9]);
        assert!(links.document_links[1].fields.is_empty());
    }
}
