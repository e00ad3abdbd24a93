use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::candidate::{Candidate, NewCandidate, UpdateCandidate};
use crate::domain::types::{CandidateId, Gender};
use crate::forms::{FormError, field_errors};

/// Format of the date-of-birth input.
pub const DOB_FORMAT: &str = "%Y-%m-%d";

fn sanitize(value: &str) -> String {
    ammonia::clean(value.trim()).trim().to_string()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
/// Form data for creating or updating a candidate.
pub struct CandidateForm {
    /// Present when editing an existing record.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "The full name field is required."))]
    pub full_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The email field is required."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The phone number field is required."))]
    pub phone_number: String,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(default)]
    #[validate(length(min = 1, message = "The date of birth field is required."))]
    pub dob: String,
    /// Place of birth.
    #[serde(default)]
    #[validate(length(min = 1, message = "The place of birth field is required."))]
    pub pob: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The gender field is required."))]
    pub gender: String,
    #[serde(default)]
    pub year_exp: String,
    #[serde(default)]
    pub last_salary: String,
}

/// Validated candidate submission.
#[derive(Debug, PartialEq, Eq)]
pub enum CandidatePayload {
    Create(NewCandidate),
    Update(UpdateCandidate),
}

impl CandidateForm {
    /// Trims every member and strips markup from the text inputs.
    pub fn sanitized(self) -> Self {
        Self {
            id: self
                .id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
            full_name: sanitize(&self.full_name),
            email: sanitize(&self.email),
            phone_number: sanitize(&self.phone_number),
            dob: self.dob.trim().to_string(),
            pob: sanitize(&self.pob),
            gender: self.gender.trim().to_string(),
            year_exp: sanitize(&self.year_exp),
            last_salary: sanitize(&self.last_salary),
        }
    }

    pub fn is_update(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }
}

impl From<Candidate> for CandidateForm {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: Some(candidate.id.into_inner()),
            full_name: candidate.full_name,
            email: candidate.email,
            phone_number: candidate.phone_number,
            dob: candidate.dob,
            pob: candidate.pob,
            gender: candidate.gender,
            year_exp: candidate.year_exp.unwrap_or_default(),
            last_salary: candidate.last_salary.unwrap_or_default(),
        }
    }
}

impl TryFrom<CandidateForm> for CandidatePayload {
    type Error = FormError;

    fn try_from(form: CandidateForm) -> Result<Self, Self::Error> {
        let form = form.sanitized();

        let mut errors = match form.validate() {
            Ok(()) => Default::default(),
            Err(err) => field_errors(&err),
        };

        if !form.dob.is_empty() && NaiveDate::parse_from_str(&form.dob, DOB_FORMAT).is_err() {
            errors.add("dob", "The date of birth is not a valid date.");
        }
        if !form.gender.is_empty() && Gender::try_from(form.gender.as_str()).is_err() {
            errors.add("gender", "The selected gender is invalid.");
        }

        if !errors.is_empty() {
            return Err(FormError::Fields(errors));
        }

        let id = form
            .id
            .as_deref()
            .map(CandidateId::new)
            .transpose()
            .map_err(|_| FormError::InvalidCandidateId)?;

        let fields = NewCandidate::new(
            form.full_name,
            form.email,
            form.phone_number,
            form.dob,
            form.pob,
            form.gender,
            Some(form.year_exp),
            Some(form.last_salary),
        );

        Ok(match id {
            Some(id) => CandidatePayload::Update(UpdateCandidate::new(id, fields)),
            None => CandidatePayload::Create(fields),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
/// Confirmation posted from the delete dialog.
pub struct DeleteCandidateForm {
    /// `"yes"` when the user pressed the confirm button.
    #[serde(default)]
    pub confirm: Option<String>,
    /// List view to go back to.
    #[serde(default)]
    pub return_to: Option<String>,
}

impl DeleteCandidateForm {
    pub fn is_confirmed(&self) -> bool {
        self.confirm
            .as_deref()
            .is_some_and(|v| matches!(v.trim(), "yes" | "true" | "1"))
    }

    /// Local path to redirect to afterwards; anything else falls back to `/`.
    pub fn return_path(&self) -> String {
        safe_return_path(self.return_to.as_deref())
    }
}

/// Accepts only same-site absolute paths.
pub fn safe_return_path(path: Option<&str>) -> String {
    match path.map(str::trim) {
        Some(p) if p.starts_with('/') && !p.starts_with("//") && !p.contains('\\') => {
            p.to_string()
        }
        _ => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CandidateForm {
        CandidateForm {
            id: None,
            full_name: "  Jane Doe ".into(),
            email: "jane@example.com".into(),
            phone_number: "0812".into(),
            dob: "1990-01-31".into(),
            pob: "Bandung".into(),
            gender: "F".into(),
            year_exp: "".into(),
            last_salary: "7000".into(),
        }
    }

    #[test]
    fn filled_form_creates_candidate() {
        let payload = CandidatePayload::try_from(filled()).unwrap();

        let CandidatePayload::Create(candidate) = payload else {
            panic!("expected create payload");
        };
        assert_eq!(candidate.full_name, "Jane Doe");
        assert_eq!(candidate.year_exp, None);
        assert_eq!(candidate.last_salary.as_deref(), Some("7000"));
    }

    #[test]
    fn markup_is_stripped() {
        let form = CandidateForm {
            full_name: "Jane<script>alert(1)</script>".into(),
            ..filled()
        };

        assert_eq!(form.sanitized().full_name, "Jane");
    }

    #[test]
    fn form_with_id_updates_candidate() {
        let form = CandidateForm {
            id: Some(" 12 ".into()),
            ..filled()
        };

        let payload = CandidatePayload::try_from(form).unwrap();

        let CandidatePayload::Update(update) = payload else {
            panic!("expected update payload");
        };
        assert_eq!(update.id.as_str(), "12");
    }

    #[test]
    fn blank_id_is_treated_as_create() {
        let form = CandidateForm {
            id: Some("  ".into()),
            ..filled()
        };

        assert!(!form.is_update());
        assert!(matches!(
            CandidatePayload::try_from(form),
            Ok(CandidatePayload::Create(_))
        ));
    }

    #[test]
    fn required_fields_are_reported_per_field() {
        let form = CandidateForm {
            full_name: "   ".into(),
            gender: "".into(),
            ..filled()
        };

        let Err(FormError::Fields(errors)) = CandidatePayload::try_from(form) else {
            panic!("expected field errors");
        };
        assert_eq!(errors.get("full_name"), ["The full name field is required."]);
        assert_eq!(errors.get("gender"), ["The gender field is required."]);
        assert!(errors.get("email").is_empty());
    }

    #[test]
    fn invalid_date_and_gender_are_rejected() {
        let form = CandidateForm {
            dob: "31/01/1990".into(),
            gender: "X".into(),
            ..filled()
        };

        let Err(FormError::Fields(errors)) = CandidatePayload::try_from(form) else {
            panic!("expected field errors");
        };
        assert!(errors.contains("dob"));
        assert!(errors.contains("gender"));
    }

    #[test]
    fn delete_needs_explicit_confirmation() {
        let confirmed = DeleteCandidateForm {
            confirm: Some("yes".into()),
            return_to: None,
        };
        assert!(confirmed.is_confirmed());
        assert!(!DeleteCandidateForm::default().is_confirmed());
        assert!(
            !DeleteCandidateForm {
                confirm: Some("no".into()),
                return_to: None,
            }
            .is_confirmed()
        );
    }

    #[test]
    fn return_path_rejects_foreign_targets() {
        assert_eq!(safe_return_path(Some("/?page=2")), "/?page=2");
        assert_eq!(safe_return_path(Some("//evil.example")), "/");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/");
        assert_eq!(safe_return_path(None), "/");
    }
}
