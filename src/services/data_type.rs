use super::{health, list, list_query};
use crate::error::Result;
use crate::executor::Executor;
use crate::types::{
    CreateDataTypeRequest, DataType, DataTypeLinks, Filter, Pagination, ServiceStatus,
    UpdateDataTypeRequest,
};

const BASE: &str = "/datatype";

/// Validators that data model fields can reference.
#[derive(Debug, Clone, Copy)]
pub struct DataTypeService<'a> {
    executor: &'a Executor,
}

impl<'a> DataTypeService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Remote service status.
    pub async fn alive(&self) -> Result<ServiceStatus> {
        health(self.executor, BASE).await
    }

    /// Get a data type by ID.
    pub async fn retrieve(&self, id: u64) -> Result<DataType> {
        self.executor
            .get(&format!("{}/types/{}", BASE, id), true, None)
            .await?
            .json()
    }

    /// List the user's data types.
    ///
    /// The service answers with a bare array and no pagination state.
    pub async fn retrieve_all(
        &self,
        filter: Option<&Filter>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<DataType>> {
        let response = self
            .executor
            .get(
                &format!("{}/types", BASE),
                true,
                Some(list_query(filter, pagination)),
            )
            .await?;
        list(response.data)
    }

    pub async fn create(&self, data_type: &CreateDataTypeRequest) -> Result<DataType> {
        self.executor
            .post(&format!("{}/types", BASE), true, Some(data_type), None)
            .await?
            .json()
    }

    pub async fn patch(&self, data_type: &UpdateDataTypeRequest) -> Result<DataType> {
        self.executor
            .patch(
                &format!("{}/types/{}", BASE, data_type.id),
                true,
                Some(data_type),
                None,
            )
            .await?
            .json()
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.executor
            .delete(&format!("{}/types/{}", BASE, id), true, None)
            .await?;
        Ok(())
    }

    /// Data fields validated by a data type.
    pub async fn retrieve_links(&self, id: u64) -> Result<DataTypeLinks> {
        self.executor
            .get(&format!("{}/types/{}/links", BASE, id), true, None)
            .await?
            .json()
    }
}
