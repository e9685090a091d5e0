use super::{health, list_field};
use crate::error::Result;
use crate::executor::Executor;
use crate::types::{Invitation, Profile, Register, ServiceStatus};

const PUBLIC_BASE: &str = "/profile";
const PRIVATE_BASE: &str = "/me";

/// Profile and registration of the authenticated user.
#[derive(Debug, Clone, Copy)]
pub struct ProfileService<'a> {
    executor: &'a Executor,
}

impl<'a> ProfileService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Remote service status.
    pub async fn alive(&self) -> Result<ServiceStatus> {
        health(self.executor, PUBLIC_BASE).await
    }

    /// Profile of the current user.
    pub async fn me(&self) -> Result<Profile> {
        self.executor.get(PRIVATE_BASE, true, None).await?.json()
    }

    /// Register the current user.
    pub async fn register(&self, profile: &Register) -> Result<Profile> {
        self.executor
            .post(
                &format!("{}/register", PUBLIC_BASE),
                true,
                Some(profile),
                None,
            )
            .await?
            .json()
    }

    /// Create an invitation code.
    pub async fn create_invitation(&self) -> Result<Invitation> {
        self.executor
            .post(
                &format!("{}/register/invitation", PUBLIC_BASE),
                true,
                None::<&()>,
                None,
            )
            .await?
            .json()
    }

    /// Invitations created by the current user.
    pub async fn list_invitations(&self) -> Result<Vec<Invitation>> {
        let response = self
            .executor
            .get(&format!("{}/register/invitation", PUBLIC_BASE), true, None)
            .await?;
        list_field(response, "invitations")
    }
}
