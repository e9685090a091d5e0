use super::health;
use crate::error::Result;
use crate::executor::Executor;
use crate::types::{QuotaResource, QuotaResources, ResourceName, ServiceStatus};

const BASE: &str = "/quota";

/// Quota usage of the authenticated user.
#[derive(Debug, Clone, Copy)]
pub struct QuotaService<'a> {
    executor: &'a Executor,
}

impl<'a> QuotaService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Remote service status.
    pub async fn alive(&self) -> Result<ServiceStatus> {
        health(self.executor, BASE).await
    }

    /// Quotas of every resource.
    pub async fn retrieve_all(&self) -> Result<QuotaResources> {
        self.executor
            .get(&format!("{}/resources", BASE), true, None)
            .await?
            .json()
    }

    /// Quotas of a single resource.
    pub async fn retrieve(&self, resource: ResourceName) -> Result<QuotaResource> {
        self.executor
            .get(
                &format!("{}/resources/{}", BASE, resource.as_str()),
                true,
                None,
            )
            .await?
            .json()
    }
}
