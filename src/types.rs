//! API types for the Reyah SDK.
//!
//! Response types default every missing field so that a partial payload
//! still deserializes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

mod data_model;
mod data_type;
mod document_model;
mod job;

pub use data_model::*;
pub use data_type::*;
pub use document_model::*;
pub use job::*;

fn coerce_u64(value: Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Accept a number, a numeric string or anything else (as 0).
fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(coerce_u64(Value::deserialize(deserializer)?))
}

/// A list of ids, each coerced like [`lenient_u64`]; anything but an array is empty.
fn lenient_u64_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(coerce_u64).collect(),
        _ => Vec::new(),
    })
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Health of a remote service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    /// Whether the service is up.
    pub ok: bool,
    /// Reason given when it is not.
    pub reason: Option<String>,
}

// === Pagination ===

/// Page selection for list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Page number.
    pub page: u32,
    /// Page size.
    pub size: u32,
}

/// Restricts a list request to the named fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filter {
    /// Field names to return.
    pub only: Vec<String>,
}

impl Filter {
    /// Return only `fields`.
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Pagination state returned with a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationStatus {
    /// Size of a page.
    #[serde(deserialize_with = "lenient_u64")]
    pub page_size: u64,
    /// Number of pages.
    #[serde(deserialize_with = "lenient_u64")]
    pub total_pages: u64,
    /// Number of entries across all pages.
    #[serde(deserialize_with = "lenient_u64")]
    pub total_entries: u64,
    /// Number of entries in this page.
    #[serde(deserialize_with = "lenient_u64")]
    pub current_size: u64,
    /// This page's number.
    #[serde(deserialize_with = "lenient_u64")]
    pub current_page: u64,
}

// === Quota ===

/// A resource subject to quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceName {
    /// Document models.
    DocumentModel,
    /// Data models.
    DataModel,
    /// Data fields.
    DataField,
    /// Conditions.
    Condition,
    /// Extraction jobs.
    ExtractionJob,
    /// Rendering jobs.
    RenderingJob,
    /// Preview jobs.
    PreviewJob,
    /// All jobs.
    Jobs,
    /// All model resources.
    ModelResources,
}

impl ResourceName {
    /// Wire name of the resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceName::DocumentModel => "document_model",
            ResourceName::DataModel => "data_model",
            ResourceName::DataField => "data_field",
            ResourceName::Condition => "condition",
            ResourceName::ExtractionJob => "extraction_job",
            ResourceName::RenderingJob => "rendering_job",
            ResourceName::PreviewJob => "preview_job",
            ResourceName::Jobs => "jobs",
            ResourceName::ModelResources => "model_resources",
        }
    }
}

/// Time window a quota applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeSelector {
    /// Since account creation.
    AllTime,
    /// Current year.
    Yearly,
    /// Current month.
    Monthly,
    /// Current week.
    Weekly,
    /// Current day.
    Daily,
    /// Current hour.
    Hourly,
}

impl RangeSelector {
    /// Wire name of the range.
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeSelector::AllTime => "alltime",
            RangeSelector::Yearly => "yearly",
            RangeSelector::Monthly => "monthly",
            RangeSelector::Weekly => "weekly",
            RangeSelector::Daily => "daily",
            RangeSelector::Hourly => "hourly",
        }
    }
}

/// Usage against a limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuotaValue {
    /// Current usage.
    #[serde(deserialize_with = "lenient_u64")]
    pub current: u64,
    /// Limit.
    #[serde(deserialize_with = "lenient_u64")]
    pub max: u64,
}

/// Quotas of one resource, keyed by range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuotaResource {
    /// Resource name.
    pub resource_name: String,
    /// Quota per range name.
    pub quotas: BTreeMap<String, QuotaValue>,
}

impl QuotaResource {
    /// Quota for `range`, if the API reported one.
    pub fn quota(&self, range: RangeSelector) -> Option<&QuotaValue> {
        self.quotas.get(range.as_str())
    }
}

/// Quotas of every resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuotaResources {
    /// One entry per resource.
    pub quotas: Vec<QuotaResource>,
}

// === Profile ===

/// A user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// User ID.
    pub user_id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Whether the user completed registration.
    pub is_registered: bool,
    /// Email address.
    pub email: String,
    /// Whether the email address is confirmed.
    pub email_confirmed: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Company name.
    pub company_name: String,
    /// Address, first line.
    pub address1: String,
    /// Address, second line.
    pub address2: String,
    /// Postal code.
    pub post_code: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Phone number.
    pub phone: String,
}

/// Registration details.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Register {
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Address, first line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// Address, second line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// An invitation code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Invitation {
    /// User who created the invitation.
    pub user_id: String,
    /// Invitation code.
    pub code: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Whether the code was used.
    pub consumed: bool,
    /// User who used the code.
    pub consumed_by: String,
}

// === OAuth ===

/// OAuth grant types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Implicit grant.
    Implicit,
    /// Authorization code grant.
    AuthorizationCode,
    /// Refresh token grant.
    RefreshToken,
    /// Client credentials grant.
    ClientCredentials,
}

/// A registered OAuth client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OAuthClient {
    /// Client ID.
    pub client_id: u64,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Whether the client is banned.
    pub banned: bool,
    /// Allowed redirect URIs.
    pub redirect_uris: Vec<String>,
    /// Granted scopes.
    pub scopes: Vec<String>,
    /// Allowed grant types.
    pub grant_types: Vec<String>,
    /// Allowed response types.
    pub response_types: Vec<String>,
    /// Logo URI.
    pub logo_uri: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// An OAuth client along with its secret.
///
/// Only returned on creation and secret regeneration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OAuthClientWithSecret {
    /// The client.
    #[serde(flatten)]
    pub client: OAuthClient,
    /// Client secret.
    #[serde(default)]
    pub client_secret: String,
}

/// Request to create an OAuth client.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOAuthClient {
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allowed redirect URIs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uris: Option<Vec<String>>,
    /// Allowed grant types.
    pub grant_types: Vec<GrantType>,
    /// Requested scopes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    /// Logo URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

/// Request to update an OAuth client.
#[derive(Debug, Clone, Serialize)]
pub struct PatchOAuthClient {
    /// Client to update.
    pub client_id: u64,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allowed redirect URIs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uris: Option<Vec<String>>,
    /// Allowed grant types.
    pub grant_types: Vec<GrantType>,
    /// Requested scopes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    /// Logo URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

/// An OAuth scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Scope {
    /// Scope name.
    pub scope: String,
    /// What the scope grants.
    pub description: String,
}

// === Feed ===

/// Kind of feed element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedElementType {
    /// No type.
    #[default]
    None,
    /// A job was rejected as invalid.
    InvalidJob,
    /// Anything this SDK does not know about.
    #[serde(other)]
    Unsupported,
}

/// Payload of an invalid-job feed element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InvalidJobFeedElement {
    /// The invalid job.
    pub job_id: String,
}

/// A notification in the user's feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedElement {
    /// Element ID.
    pub id: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Whether the user has seen it.
    pub seen: bool,
    /// Element kind.
    #[serde(rename = "type")]
    pub element_type: FeedElementType,
    /// Set for [`FeedElementType::InvalidJob`].
    pub invalid_job: Option<InvalidJobFeedElement>,
    /// Raw payload of elements of unknown kind.
    pub unsupported_element: Option<Value>,
}

/// A page of feed elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginatedFeedElements {
    /// Elements in this page.
    pub elements: Vec<FeedElement>,
    /// Pagination state.
    pub pagination_status: PaginationStatus,
}
