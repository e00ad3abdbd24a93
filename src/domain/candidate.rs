use serde::{Deserialize, Serialize};

use crate::domain::types::{CandidateId, optional_scalar, scalar_or_empty};

/// Candidate record as returned by `GET candidate/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub full_name: String,
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub phone_number: String,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub dob: String,
    /// Place of birth.
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub pob: String,
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub gender: String,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub year_exp: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub last_salary: Option<String>,
}

/// Row of the candidate listing.
///
/// Rows without a usable id are still listed, just without action links.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateRow {
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub full_name: String,
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub phone_number: String,
    #[serde(
        rename = "createdDate",
        default,
        deserialize_with = "optional_scalar"
    )]
    pub created_date: Option<String>,
}

/// Body of `POST candidate/`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewCandidate {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub dob: String,
    pub pob: String,
    pub gender: String,
    pub year_exp: Option<String>,
    pub last_salary: Option<String>,
}

impl NewCandidate {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        full_name: String,
        email: String,
        phone_number: String,
        dob: String,
        pob: String,
        gender: String,
        year_exp: Option<String>,
        last_salary: Option<String>,
    ) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone_number: phone_number.trim().to_string(),
            dob: dob.trim().to_string(),
            pob: pob.trim().to_string(),
            gender: gender.trim().to_string(),
            year_exp: year_exp
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            last_salary: last_salary
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Body of `PUT candidate/`: the full record with its identifier.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UpdateCandidate {
    pub id: CandidateId,
    #[serde(flatten)]
    pub fields: NewCandidate,
}

impl UpdateCandidate {
    #[must_use]
    pub fn new(id: CandidateId, fields: NewCandidate) -> Self {
        Self { id, fields }
    }
}
