//! HTTP request helper for the remote REST API.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::repository::errors::{FieldErrors, RepositoryError, RepositoryResult};

/// Standard response wrapper of the remote API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub code: u16,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Body of a non-successful response. Only the members used for reporting are
/// decoded.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

/// Thin wrapper around [`reqwest::Client`] bound to the API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for `base_url`. A trailing slash is appended when
    /// missing so that relative resource paths join below it.
    pub fn new(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| {
            RepositoryError::Unexpected(format!("Invalid API url {base_url}: {e}"))
        })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> RepositoryResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| RepositoryError::Unexpected(format!("Invalid API path {path}: {e}")))
    }

    /// Issues one request against `path`.
    ///
    /// `GET` requests carry `data` as query parameters, every other method as
    /// a JSON body.
    pub async fn request<D, T>(
        &self,
        method: Method,
        path: &str,
        data: Option<&D>,
    ) -> RepositoryResult<ApiResponse<T>>
    where
        D: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        log::debug!("{method} {url}");

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(data) = data {
            request = if method == Method::GET {
                request.query(data)
            } else {
                request.json(data)
            };
        }

        let response = request.send().await?;
        Self::read_response(response).await
    }

    async fn read_response<T>(response: Response) -> RepositoryResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            return Ok(serde_json::from_slice(&body)?);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(RepositoryError::Unauthorized);
        }

        let body = response.bytes().await.unwrap_or_default();
        let error_body = serde_json::from_slice::<ErrorBody>(&body).unwrap_or_default();
        let message = error_body
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        Err(match status {
            StatusCode::UNPROCESSABLE_ENTITY => RepositoryError::Validation {
                message,
                errors: error_body.errors.unwrap_or_default(),
            },
            StatusCode::NOT_FOUND => RepositoryError::NotFound,
            _ => RepositoryError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    pub async fn get<D, T>(&self, path: &str, query: Option<&D>) -> RepositoryResult<ApiResponse<T>>
    where
        D: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::GET, path, query).await
    }

    pub async fn post<D, T>(&self, path: &str, body: &D) -> RepositoryResult<ApiResponse<T>>
    where
        D: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<D, T>(&self, path: &str, body: &D) -> RepositoryResult<ApiResponse<T>>
    where
        D: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T>(&self, path: &str) -> RepositoryResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        self.request::<(), T>(Method::DELETE, path, None).await
    }
}
