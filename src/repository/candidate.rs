use crate::domain::candidate::{Candidate, CandidateRow, NewCandidate, UpdateCandidate};
use crate::domain::datatable::{PaginationPayload, ResponseDataTable};
use crate::domain::types::CandidateId;
use crate::repository::client::ApiResponse;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ApiRepository, CANDIDATE_RESOURCE, CandidateReader, CandidateWriter};

fn candidate_path(id: &CandidateId) -> String {
    format!("{CANDIDATE_RESOURCE}{id}")
}

impl CandidateReader for ApiRepository {
    async fn list_candidates(
        &self,
        query: &PaginationPayload,
    ) -> RepositoryResult<ResponseDataTable<CandidateRow>> {
        let response: ApiResponse<ResponseDataTable<CandidateRow>> =
            self.client.get(CANDIDATE_RESOURCE, Some(query)).await?;

        Ok(response.data.unwrap_or_default())
    }

    async fn get_candidate(&self, id: &CandidateId) -> RepositoryResult<Option<Candidate>> {
        match self
            .client
            .get::<(), Candidate>(&candidate_path(id), None)
            .await
        {
            Ok(response) => Ok(response.data),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl CandidateWriter for ApiRepository {
    async fn create_candidate(
        &self,
        new_candidate: &NewCandidate,
    ) -> RepositoryResult<ApiResponse<Candidate>> {
        self.client.post(CANDIDATE_RESOURCE, new_candidate).await
    }

    async fn update_candidate(
        &self,
        updates: &UpdateCandidate,
    ) -> RepositoryResult<ApiResponse<Candidate>> {
        self.client.put(CANDIDATE_RESOURCE, updates).await
    }

    async fn delete_candidate(
        &self,
        id: &CandidateId,
    ) -> RepositoryResult<ApiResponse<serde_json::Value>> {
        self.client.delete(&candidate_path(id)).await
    }
}
