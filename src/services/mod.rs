//! Resource services built on the [`Executor`].
//!
//! Each service is a thin borrow of the client's executor mapping method
//! calls to API paths.

mod data_model;
mod data_type;
mod document_model;
mod feed;
mod job;
mod oauth;
mod profile;
mod quota;

pub use data_model::DataModelService;
pub use data_type::DataTypeService;
pub use document_model::DocumentModelService;
pub use feed::FeedService;
pub use job::JobService;
pub use oauth::OAuthService;
pub use profile::ProfileService;
pub use quota::QuotaService;

use crate::error::Result;
use crate::executor::Executor;
use crate::request::QueryParams;
use crate::response::Response;
use crate::types::{Filter, Pagination, PaginationStatus, ServiceStatus};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// `GET <base>/health`, unauthenticated.
async fn health(executor: &Executor, base: &str) -> Result<ServiceStatus> {
    executor
        .get(&format!("{}/health", base), false, None)
        .await?
        .json()
}

/// Deserialize an array, or an empty list for anything else.
fn list<T: DeserializeOwned>(data: Value) -> Result<Vec<T>> {
    match data {
        value @ Value::Array(_) => Ok(serde_json::from_value(value)?),
        _ => Ok(Vec::new()),
    }
}

/// Deserialize the array at `key`, or an empty list when it is missing or not an array.
fn list_field<T: DeserializeOwned>(response: Response, key: &str) -> Result<Vec<T>> {
    list(response.field::<Value>(key)?)
}

/// Deserialize the list at `key` with its pagination state.
///
/// Yields an empty page unless the list is an array and the state an object.
fn page<T: DeserializeOwned>(mut data: Value, key: &str) -> Result<(Vec<T>, PaginationStatus)> {
    let items = data.get_mut(key).map(Value::take);
    let status = data.get_mut("pagination_status").map(Value::take);

    match (items, status) {
        (Some(items @ Value::Array(_)), Some(status @ Value::Object(_))) => Ok((
            serde_json::from_value(items)?,
            serde_json::from_value(status)?,
        )),
        _ => Ok((Vec::new(), PaginationStatus::default())),
    }
}

/// `only`, `page` and `size` parameters of list requests.
fn list_query(filter: Option<&Filter>, pagination: Option<Pagination>) -> QueryParams {
    let mut query = QueryParams::new();
    if let Some(filter) = filter {
        query.push("only", filter.only.join(","));
    }
    if let Some(p) = pagination {
        query.push("page", p.page);
        query.push("size", p.size);
    }
    query
}

/// `version` parameter; 0 selects the latest version like `None`.
fn version_query(version: Option<u32>) -> Option<QueryParams> {
    version
        .filter(|v| *v != 0)
        .map(|v| QueryParams::new().with("version", v))
}
