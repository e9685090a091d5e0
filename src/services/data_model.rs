use super::{health, list_query, page, version_query};
use crate::error::Result;
use crate::executor::Executor;
use crate::types::{
    CreateDataModelRequest, CreateFieldRequest, DataFieldLinks, DataModel, DataModelLinks, Field,
    Filter, PaginatedDataModels, PaginatedFields, Pagination, ServiceStatus,
    UpdateDataModelRequest, UpdateFieldRequest,
};

const BASE: &str = "/datamodel";

/// Data models and the fields they are made of.
#[derive(Debug, Clone, Copy)]
pub struct DataModelService<'a> {
    executor: &'a Executor,
}

impl<'a> DataModelService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Remote service status.
    pub async fn alive(&self) -> Result<ServiceStatus> {
        health(self.executor, BASE).await
    }

    // === Models ===

    /// Get a data model, at `version` or the latest.
    pub async fn retrieve(&self, model_id: u64, version: Option<u32>) -> Result<DataModel> {
        self.executor
            .get(
                &format!("{}/models/{}", BASE, model_id),
                true,
                version_query(version),
            )
            .await?
            .json()
    }

    /// List the user's data models.
    pub async fn retrieve_all(
        &self,
        filter: Option<&Filter>,
        pagination: Option<Pagination>,
    ) -> Result<PaginatedDataModels> {
        let response = self
            .executor
            .get(
                &format!("{}/models", BASE),
                true,
                Some(list_query(filter, pagination)),
            )
            .await?;
        let (models, pagination_status) = page(response.data, "models")?;
        Ok(PaginatedDataModels {
            models,
            pagination_status,
        })
    }

    pub async fn create(&self, model: &CreateDataModelRequest) -> Result<DataModel> {
        self.executor
            .post(&format!("{}/models", BASE), true, Some(model), None)
            .await?
            .json()
    }

    pub async fn patch(&self, model: &UpdateDataModelRequest) -> Result<DataModel> {
        self.executor
            .patch(
                &format!("{}/models/{}", BASE, model.model_id),
                true,
                Some(model),
                None,
            )
            .await?
            .json()
    }

    pub async fn delete(&self, model_id: u64) -> Result<()> {
        self.executor
            .delete(&format!("{}/models/{}", BASE, model_id), true, None)
            .await?;
        Ok(())
    }

    /// Document models built on a data model.
    pub async fn retrieve_model_links(&self, model_id: u64) -> Result<DataModelLinks> {
        self.executor
            .get(&format!("{}/models/{}/links", BASE, model_id), true, None)
            .await?
            .json()
    }

    // === Fields ===

    /// Get a field, at `version` or the latest.
    pub async fn retrieve_field(&self, field_id: u64, version: Option<u32>) -> Result<Field> {
        self.executor
            .get(
                &format!("{}/fields/{}", BASE, field_id),
                true,
                version_query(version),
            )
            .await?
            .json()
    }

    /// List the user's fields.
    pub async fn retrieve_all_fields(&self, pagination: Option<Pagination>) -> Result<PaginatedFields> {
        let response = self
            .executor
            .get(
                &format!("{}/fields", BASE),
                true,
                Some(list_query(None, pagination)),
            )
            .await?;
        let (fields, pagination_status) = page(response.data, "fields")?;
        Ok(PaginatedFields {
            fields,
            pagination_status,
        })
    }

    pub async fn create_field(&self, field: &CreateFieldRequest) -> Result<Field> {
        self.executor
            .post(&format!("{}/fields", BASE), true, Some(field), None)
            .await?
            .json()
    }

    pub async fn patch_field(&self, field: &UpdateFieldRequest) -> Result<Field> {
        self.executor
            .patch(
                &format!("{}/fields/{}", BASE, field.field_id),
                true,
                Some(field),
                None,
            )
            .await?
            .json()
    }

    pub async fn delete_field(&self, field_id: u64) -> Result<()> {
        self.executor
            .delete(&format!("{}/fields/{}", BASE, field_id), true, None)
            .await?;
        Ok(())
    }

    /// Data models containing a field.
    pub async fn retrieve_field_links(&self, field_id: u64) -> Result<DataFieldLinks> {
        self.executor
            .get(&format!("{}/fields/{}/links", BASE, field_id), true, None)
            .await?
            .json()
    }
}
