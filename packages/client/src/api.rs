//! Transport seam between the controller and the students API.
//!
//! The controller only sees the `StudentsApi` trait; `ApiClient` is the HTTP
//! implementation against a base URL resolved once at construction.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use rosterbox_students::models::{CreateStudent, Student, UpdateStudent};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the payload and said why.
    #[error("{0}")]
    Validation(String),
    #[error("Not found")]
    NotFound,
    /// The server failed without usable detail.
    #[error("Server error")]
    Server,
    #[error("Network error")]
    Transport,
}

#[async_trait]
pub trait StudentsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, ClientError>;
    async fn get(&self, id: &str) -> Result<Student, ClientError>;
    async fn create(&self, student: &CreateStudent) -> Result<Student, ClientError>;
    async fn update(&self, id: &str, student: &UpdateStudent) -> Result<Student, ClientError>;
    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}

/// HTTP client for the students API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Resolves the API base address from `ROSTERBOX_API_URL`, falling back to
    /// [`DEFAULT_API_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ROSTERBOX_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        log::debug!("ApiClient: base_url={base_url}");
        Self::new(base_url)
    }

    fn students_url(&self) -> String {
        format!("{}/students", self.base_url)
    }

    fn student_url(&self, id: &str) -> String {
        format!("{}/students/{id}", self.base_url)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        log::warn!("Transport failure: {value:?}");
        Self::Transport
    }
}

/// Maps a non-success response to the error taxonomy, pulling the server's
/// `{message}` body through when one is present.
async fn error_for(response: reqwest::Response) -> ClientError {
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return ClientError::NotFound;
    }

    if status == reqwest::StatusCode::BAD_REQUEST {
        if let Ok(body) = response.json::<ErrorBody>().await {
            return ClientError::Validation(body.message);
        }
        return ClientError::Server;
    }

    log::warn!("Server failure: status={status}");
    ClientError::Server
}

#[async_trait]
impl StudentsApi for ApiClient {
    async fn list(&self) -> Result<Vec<Student>, ClientError> {
        let response = self.client.get(self.students_url()).send().await?;

        if !response.status().is_success() {
            return Err(error_for(response).await);
        }

        Ok(response.json().await?)
    }

    async fn get(&self, id: &str) -> Result<Student, ClientError> {
        let response = self.client.get(self.student_url(id)).send().await?;

        if !response.status().is_success() {
            return Err(error_for(response).await);
        }

        Ok(response.json().await?)
    }

    async fn create(&self, student: &CreateStudent) -> Result<Student, ClientError> {
        let response = self
            .client
            .post(self.students_url())
            .json(student)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for(response).await);
        }

        Ok(response.json().await?)
    }

    async fn update(&self, id: &str, student: &UpdateStudent) -> Result<Student, ClientError> {
        let response = self
            .client
            .put(self.student_url(id))
            .json(student)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for(response).await);
        }

        Ok(response.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self.client.delete(self.student_url(id)).send().await?;

        if !response.status().is_success() {
            return Err(error_for(response).await);
        }

        Ok(())
    }
}
