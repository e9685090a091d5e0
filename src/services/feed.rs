use super::{health, list_query, page};
use crate::error::Result;
use crate::executor::Executor;
use crate::request::QueryParams;
use crate::types::{PaginatedFeedElements, Pagination, ServiceStatus};
use serde_json::Value;

const BASE: &str = "/feed";

/// Notifications addressed to the user.
#[derive(Debug, Clone, Copy)]
pub struct FeedService<'a> {
    executor: &'a Executor,
}

impl<'a> FeedService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Remote service status.
    pub async fn alive(&self) -> Result<ServiceStatus> {
        health(self.executor, BASE).await
    }

    /// Feed elements created since `start_at` (RFC 3339).
    pub async fn retrieve_all_elements(
        &self,
        start_at: &str,
        pagination: Option<Pagination>,
    ) -> Result<PaginatedFeedElements> {
        let mut query = list_query(None, pagination);
        query.push("start_at", start_at);

        let response = self
            .executor
            .get(&format!("{}/elements", BASE), true, Some(query))
            .await?;
        parse_elements(response.data)
    }

    /// Mark an element as seen.
    pub async fn set_seen(&self, element_id: &str) -> Result<()> {
        self.executor
            .put(
                &format!("{}/element/{}", BASE, element_id),
                true,
                None::<&()>,
                Some(QueryParams::new().with("element_id", element_id)),
            )
            .await?;
        Ok(())
    }
}

fn parse_elements(data: Value) -> Result<PaginatedFeedElements> {
    let (elements, pagination_status) = page(data, "feed_elements")?;
    Ok(PaginatedFeedElements {
        elements,
        pagination_status,
    })
}
