use super::{health, list_field, list_query, page, version_query};
use crate::error::Result;
use crate::executor::Executor;
use crate::types::{
    ContentType, CreateDocumentModelFieldRequest, CreateDocumentModelRequest, DocumentModel,
    DocumentModelField, Filter, PaginatedDocumentModels, Pagination, PreviewUrl, PreviewUrls,
    ServiceStatus, UpdateDocumentModelFieldRequest, UpdateDocumentModelRequest,
};
use serde::Serialize;

const BASE: &str = "/document";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewRequest {
    id: String,
    content_type: ContentType,
}

#[derive(Serialize)]
struct FieldsRequest<'f> {
    fields: &'f [CreateDocumentModelFieldRequest],
}

/// Document models, their fields and preview images.
#[derive(Debug, Clone, Copy)]
pub struct DocumentModelService<'a> {
    executor: &'a Executor,
}

impl<'a> DocumentModelService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Remote service status.
    pub async fn alive(&self) -> Result<ServiceStatus> {
        health(self.executor, BASE).await
    }

    /// Get a document model, at `version` or the latest.
    pub async fn retrieve(&self, id: u64, version: Option<u32>) -> Result<DocumentModel> {
        self.executor
            .get(&format!("{}/models/{}", BASE, id), true, version_query(version))
            .await?
            .json()
    }

    /// List the user's document models.
    pub async fn retrieve_all(
        &self,
        filter: Option<&Filter>,
        pagination: Option<Pagination>,
    ) -> Result<PaginatedDocumentModels> {
        let response = self
            .executor
            .get(
                &format!("{}/models", BASE),
                true,
                Some(list_query(filter, pagination)),
            )
            .await?;
        let (models, pagination_status) = page(response.data, "models")?;
        Ok(PaginatedDocumentModels {
            models,
            pagination_status,
        })
    }

    pub async fn create(&self, model: &CreateDocumentModelRequest) -> Result<DocumentModel> {
        self.executor
            .post(&format!("{}/models", BASE), true, Some(model), None)
            .await?
            .json()
    }

    pub async fn patch(&self, model: &UpdateDocumentModelRequest) -> Result<DocumentModel> {
        self.executor
            .patch(&format!("{}/models/{}", BASE, model.id), true, Some(model), None)
            .await?
            .json()
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.executor
            .delete(&format!("{}/models/{}", BASE, id), true, None)
            .await?;
        Ok(())
    }

    // === Preview ===

    /// Presigned URLs of the model's preview images.
    pub async fn preview_urls(&self, id: u64) -> Result<PreviewUrls> {
        self.executor
            .get(&format!("{}/models/{}/preview", BASE, id), true, None)
            .await?
            .json()
    }

    /// Get a presigned URL to upload a new preview of `content_type` to.
    pub async fn set_preview(&self, id: u64, content_type: ContentType) -> Result<PreviewUrl> {
        let body = PreviewRequest {
            id: id.to_string(),
            content_type,
        };
        self.executor
            .patch(&format!("{}/models/{}/preview", BASE, id), true, Some(&body), None)
            .await?
            .json()
    }

    pub async fn delete_preview(&self, id: u64) -> Result<()> {
        self.executor
            .delete(&format!("{}/models/{}/preview", BASE, id), true, None)
            .await?;
        Ok(())
    }

    // === Fields ===

    /// Add fields to a model, returning the created fields.
    pub async fn create_fields(
        &self,
        id: u64,
        fields: &[CreateDocumentModelFieldRequest],
    ) -> Result<Vec<DocumentModelField>> {
        let body = FieldsRequest { fields };
        let response = self
            .executor
            .post(&format!("{}/models/{}/fields", BASE, id), true, Some(&body), None)
            .await?;
        list_field(response, "fields")
    }

    /// Get a field of the model, at `version` of the model or the latest.
    pub async fn retrieve_field(
        &self,
        id: u64,
        field_id: u64,
        version: Option<u32>,
    ) -> Result<DocumentModelField> {
        self.executor
            .get(
                &format!("{}/models/{}/fields/{}", BASE, id, field_id),
                true,
                version_query(version),
            )
            .await?
            .json()
    }

    pub async fn retrieve_all_fields(&self, id: u64) -> Result<Vec<DocumentModelField>> {
        let response = self
            .executor
            .get(&format!("{}/models/{}/fields", BASE, id), true, None)
            .await?;
        list_field(response, "fields")
    }

    pub async fn update_field(
        &self,
        id: u64,
        field: &UpdateDocumentModelFieldRequest,
    ) -> Result<DocumentModelField> {
        self.executor
            .patch(
                &format!("{}/models/{}/fields/{}", BASE, id, field.id),
                true,
                Some(field),
                None,
            )
            .await?
            .json()
    }

    pub async fn delete_field(&self, id: u64, field_id: u64) -> Result<()> {
        self.executor
            .delete(&format!("{}/models/{}/fields/{}", BASE, id, field_id), true, None)
            .await?;
        Ok(())
    }
}
