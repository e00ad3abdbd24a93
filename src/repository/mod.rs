//! Access to the remote candidate resource.
//!
//! Services only see the [`CandidateReader`] and [`CandidateWriter`] traits;
//! [`ApiRepository`] implements them on top of the HTTP [`ApiClient`].

#![allow(async_fn_in_trait)]

use std::time::Duration;

use crate::domain::candidate::{Candidate, CandidateRow, NewCandidate, UpdateCandidate};
use crate::domain::datatable::{PaginationPayload, ResponseDataTable};
use crate::domain::types::CandidateId;
use crate::repository::client::{ApiClient, ApiResponse};
use crate::repository::errors::RepositoryResult;

pub mod candidate;
pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Path of the candidate resource relative to the API base URL.
pub const CANDIDATE_RESOURCE: &str = "candidate/";

pub trait CandidateReader {
    async fn list_candidates(
        &self,
        query: &PaginationPayload,
    ) -> RepositoryResult<ResponseDataTable<CandidateRow>>;
    async fn get_candidate(&self, id: &CandidateId) -> RepositoryResult<Option<Candidate>>;
}

pub trait CandidateWriter {
    async fn create_candidate(
        &self,
        new_candidate: &NewCandidate,
    ) -> RepositoryResult<ApiResponse<Candidate>>;
    async fn update_candidate(
        &self,
        updates: &UpdateCandidate,
    ) -> RepositoryResult<ApiResponse<Candidate>>;
    async fn delete_candidate(
        &self,
        id: &CandidateId,
    ) -> RepositoryResult<ApiResponse<serde_json::Value>>;
}

/// Repository backed by the remote REST API.
#[derive(Clone, Debug)]
pub struct ApiRepository {
    client: ApiClient,
}

impl ApiRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Convenience constructor building the underlying [`ApiClient`].
    pub fn connect(api_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        Ok(Self::new(ApiClient::new(api_url, timeout)?))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}
