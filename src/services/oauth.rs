use super::{health, list_field};
use crate::error::Result;
use crate::executor::Executor;
use crate::types::{
    CreateOAuthClient, OAuthClient, OAuthClientWithSecret, PatchOAuthClient, Scope, ServiceStatus,
};

const BASE: &str = "/oauth";

/// Management of the user's OAuth clients.
#[derive(Debug, Clone, Copy)]
pub struct OAuthService<'a> {
    executor: &'a Executor,
}

impl<'a> OAuthService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Remote service status.
    pub async fn alive(&self) -> Result<ServiceStatus> {
        health(self.executor, BASE).await
    }

    /// Create a client. The secret is only returned here and by [`regen_secret`](Self::regen_secret).
    pub async fn create_client(&self, client: &CreateOAuthClient) -> Result<OAuthClientWithSecret> {
        self.executor
            .post(&format!("{}/clients", BASE), true, Some(client), None)
            .await?
            .json()
    }

    /// Get a client by ID.
    pub async fn retrieve_client(&self, client_id: u64) -> Result<OAuthClient> {
        self.executor
            .get(&format!("{}/clients/{}", BASE, client_id), true, None)
            .await?
            .json()
    }

    /// List all clients.
    pub async fn retrieve_all_clients(&self) -> Result<Vec<OAuthClient>> {
        let response = self
            .executor
            .get(&format!("{}/clients", BASE), true, None)
            .await?;
        list_field(response, "clients")
    }

    /// Update a client.
    pub async fn patch_client(&self, client: &PatchOAuthClient) -> Result<OAuthClient> {
        self.executor
            .patch(
                &format!("{}/clients/{}", BASE, client.client_id),
                true,
                Some(client),
                None,
            )
            .await?
            .json()
    }

    /// Delete a client.
    pub async fn delete_client(&self, client_id: u64) -> Result<()> {
        self.executor
            .delete(&format!("{}/clients/{}", BASE, client_id), true, None)
            .await?;
        Ok(())
    }

    /// Issue a new secret for a client.
    pub async fn regen_secret(&self, client_id: u64) -> Result<OAuthClientWithSecret> {
        self.executor
            .post(
                &format!("{}/clients/{}/secret", BASE, client_id),
                true,
                None::<&()>,
                None,
            )
            .await?
            .json()
    }

    /// List the scopes a client may request.
    pub async fn list_scopes(&self) -> Result<Vec<Scope>> {
        let response = self
            .executor
            .get(&format!("{}/scopes", BASE), true, None)
            .await?;
        list_field(response, "scopes")
    }
}
