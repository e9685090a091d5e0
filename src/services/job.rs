use super::{health, list_query, page};
use crate::error::Result;
use crate::executor::Executor;
use crate::types::{
    CreateExtractionJobRequest, CreateRenderingJobRequest, CreatedJob, DocumentUrl, ExtractionJob,
    ExtractionJobOutput, PaginatedExtractionJobs, PaginatedRenderingJobs, Pagination,
    RenderingJob, ServiceStatus,
};

const BASE: &str = "/job";

/// Extraction and rendering jobs.
///
/// Creating a job returns a presigned URL; the job starts once the document
/// has been uploaded there.
#[derive(Debug, Clone, Copy)]
pub struct JobService<'a> {
    executor: &'a Executor,
}

impl<'a> JobService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Remote service status.
    pub async fn alive(&self) -> Result<ServiceStatus> {
        health(self.executor, BASE).await
    }

    // === Extraction ===

    pub async fn create_extraction_job(&self, job: &CreateExtractionJobRequest) -> Result<CreatedJob> {
        self.executor
            .post(&format!("{}/extraction/jobs", BASE), true, Some(job), None)
            .await?
            .json()
    }

    pub async fn retrieve_extraction_job(&self, id: &str) -> Result<ExtractionJob> {
        self.executor
            .get(&format!("{}/extraction/jobs/{}", BASE, id), true, None)
            .await?
            .json()
    }

    pub async fn retrieve_all_extraction_jobs(
        &self,
        pagination: Option<Pagination>,
    ) -> Result<PaginatedExtractionJobs> {
        let response = self
            .executor
            .get(
                &format!("{}/extraction/jobs", BASE),
                true,
                Some(list_query(None, pagination)),
            )
            .await?;
        let (jobs, pagination_status) = page(response.data, "jobs")?;
        Ok(PaginatedExtractionJobs {
            jobs,
            pagination_status,
        })
    }

    /// Extracted values of a succeeded job.
    pub async fn retrieve_extraction_job_output(&self, id: &str) -> Result<ExtractionJobOutput> {
        self.executor
            .get(&format!("{}/extraction/jobs/{}/output", BASE, id), true, None)
            .await?
            .json()
    }

    // === Rendering ===

    pub async fn create_rendering_job(&self, job: &CreateRenderingJobRequest) -> Result<CreatedJob> {
        self.executor
            .post(&format!("{}/rendering/jobs", BASE), true, Some(job), None)
            .await?
            .json()
    }

    pub async fn retrieve_rendering_job(&self, id: &str) -> Result<RenderingJob> {
        self.executor
            .get(&format!("{}/rendering/jobs/{}", BASE, id), true, None)
            .await?
            .json()
    }

    pub async fn retrieve_all_rendering_jobs(
        &self,
        pagination: Option<Pagination>,
    ) -> Result<PaginatedRenderingJobs> {
        let response = self
            .executor
            .get(
                &format!("{}/rendering/jobs", BASE),
                true,
                Some(list_query(None, pagination)),
            )
            .await?;
        let (jobs, pagination_status) = page(response.data, "jobs")?;
        Ok(PaginatedRenderingJobs {
            jobs,
            pagination_status,
        })
    }

    /// Presigned URL of the rendered document.
    pub async fn retrieve_rendering_job_output(&self, id: &str) -> Result<DocumentUrl> {
        self.executor
            .get(&format!("{}/rendering/jobs/{}/output", BASE, id), true, None)
            .await?
            .json()
    }
}
