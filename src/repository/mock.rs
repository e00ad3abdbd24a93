//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::candidate::{Candidate, CandidateRow, NewCandidate, UpdateCandidate};
use crate::domain::datatable::{PaginationPayload, ResponseDataTable};
use crate::domain::types::CandidateId;
use crate::repository::client::ApiResponse;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CandidateReader, CandidateWriter};

mock! {
    pub Repository {}

    impl CandidateReader for Repository {
        async fn list_candidates(
            &self,
            query: &PaginationPayload,
        ) -> RepositoryResult<ResponseDataTable<CandidateRow>>;
        async fn get_candidate(&self, id: &CandidateId) -> RepositoryResult<Option<Candidate>>;
    }

    impl CandidateWriter for Repository {
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
}
