use super::{lenient_u64, lenient_u64_list};
use serde::{Deserialize, Serialize};

/// A named validator applied to data fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataType {
    /// Data type ID.
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
    /// Owner.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Validation expression.
    pub validator: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Request to create a data type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDataTypeRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub validator: String,
}

/// Request to replace an existing data type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDataTypeRequest {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub validator: String,
}

/// Data fields that use a data type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataTypeLinks {
    #[serde(deserialize_with = "lenient_u64_list")]
    pub data_fields: Vec<u64>,
}
