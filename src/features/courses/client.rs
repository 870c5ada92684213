//! Course API access. One unparameterized `GET` against a fixed endpoint that
//! returns a JSON array of courses.

use super::types::CourseRecord;
use crate::app::{AppError, build_client, get_json};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

#[async_trait]
pub trait CourseSource: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<CourseRecord>, AppError>;
}

#[derive(Clone, Debug)]
pub struct HttpCourseSource {
    http: Client,
    endpoint: Url,
}

impl HttpCourseSource {
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(endpoint: Url) -> Result<Self, AppError> {
        Ok(Self {
            http: build_client()?,
            endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CourseSource for HttpCourseSource {
    async fn fetch_courses(&self) -> Result<Vec<CourseRecord>, AppError> {
        let courses: Vec<CourseRecord> = get_json(&self.http, &self.endpoint).await?;
        debug!(count = courses.len(), "courses fetched");
        Ok(courses)
    }
}
