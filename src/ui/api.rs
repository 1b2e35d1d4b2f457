//! Client-side transport to the record service
//!
//! [`StudentApi`] is the seam the UI controller talks through.
//! [`HttpStudentApi`] speaks HTTP/JSON to a running server; a
//! [`StudentService`] can be used directly for in-process clients.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::rest_api::{DeleteResponse, RestError, StudentService};
use crate::schema::{NewStudent, Student, StudentPatch};
use crate::store::StudentStore;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The service answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Service {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// The request never got a usable answer
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Service { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Record-service operations as seen from the client.
#[async_trait]
pub trait StudentApi: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<Student>>;
    async fn create(&self, doc: &NewStudent) -> ApiResult<Student>;
    async fn update(&self, id: &str, patch: &StudentPatch) -> ApiResult<Student>;
    async fn delete(&self, id: &str) -> ApiResult<DeleteResponse>;
}

// ==================
// HTTP transport
// ==================

/// Error body as sent by the service; `code` may be absent.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// HTTP client for `<base_url>/api/students`.
#[derive(Debug, Clone)]
pub struct HttpStudentApi {
    client: Client,
    base_url: String,
}

impl HttpStudentApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/students", self.base_url)
    }

    /// `<collection>/<id>` with the id percent-encoded as one path segment.
    fn record_url(&self, id: &str) -> ApiResult<Url> {
        let mut url = Url::parse(&self.collection_url())
            .map_err(|e| ApiError::Transport(format!("Invalid server URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("Invalid server URL: {}", self.base_url)))?
            .push(id);
        Ok(url)
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(transport);
    }

    let text = response.text().await.map_err(transport)?;
    let (message, code) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.message, body.code),
        Err(_) if !text.trim().is_empty() => (text, None),
        Err(_) => (
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
            None,
        ),
    };

    Err(ApiError::Service {
        status: status.as_u16(),
        message,
        code,
    })
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn list(&self) -> ApiResult<Vec<Student>> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn create(&self, doc: &NewStudent) -> ApiResult<Student> {
        let response = self
            .client
            .post(self.collection_url())
            .json(doc)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn update(&self, id: &str, patch: &StudentPatch) -> ApiResult<Student> {
        let response = self
            .client
            .put(self.record_url(id)?)
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn delete(&self, id: &str) -> ApiResult<DeleteResponse> {
        let response = self
            .client
            .delete(self.record_url(id)?)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}

// ==================
// In-process transport
// ==================

impl From<RestError> for ApiError {
    fn from(err: RestError) -> Self {
        ApiError::Service {
            status: err.status_code().as_u16(),
            code: Some(err.code().to_string()),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl<S: StudentStore + 'static> StudentApi for StudentService<S> {
    async fn list(&self) -> ApiResult<Vec<Student>> {
        Ok(StudentService::list(self)?)
    }

    async fn create(&self, doc: &NewStudent) -> ApiResult<Student> {
        Ok(StudentService::create(self, doc.clone())?)
    }

    async fn update(&self, id: &str, patch: &StudentPatch) -> ApiResult<Student> {
        Ok(StudentService::update(self, id, patch.clone())?)
    }

    async fn delete(&self, id: &str) -> ApiResult<DeleteResponse> {
        Ok(StudentService::delete(self, id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_urls_trim_trailing_slash() {
        let api = HttpStudentApi::new("http://localhost:5000/");
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(api.collection_url(), "http://localhost:5000/api/students");
        assert_eq!(
            api.record_url("abc").unwrap().as_str(),
            "http://localhost:5000/api/students/abc"
        );
    }

    #[test]
    fn test_record_url_encodes_id() {
        let api = HttpStudentApi::new("http://localhost:5000");
        assert_eq!(
            api.record_url("a/b c").unwrap().as_str(),
            "http://localhost:5000/api/students/a%2Fb%20c"
        );
        assert!(HttpStudentApi::new("not a url").record_url("x").is_err());
    }

    #[tokio::test]
    async fn test_in_process_errors_carry_status() {
        let service = StudentService::new(MemoryStore::new());
        let err = StudentApi::delete(&service, "missing").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        match err {
            ApiError::Service { message, code, .. } => {
                assert_eq!(message, "Student not found");
                assert_eq!(code.as_deref(), Some("NOT_FOUND"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
