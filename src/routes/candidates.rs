use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::dto::candidates::{CandidateFormPageData, DeleteOutcome};
use crate::forms::candidate::{CandidateForm, DeleteCandidateForm};
use crate::repository::ApiRepository;
use crate::routes::{
    UNAUTHORIZED_URL, base_context, redirect, render_template, render_template_with_status,
};
use crate::services::{ServiceError, candidates as candidates_service};

#[derive(Deserialize)]
struct DeleteQueryParams {
    return_to: Option<String>,
}

fn render_form(
    tera: &Tera,
    mut context: Context,
    data: &CandidateFormPageData,
    status: StatusCode,
) -> HttpResponse {
    context.insert("form", &data.form);
    context.insert("errors", &data.errors);
    context.insert("genders", &data.genders);
    context.insert("is_update", &data.is_update);

    render_template_with_status(tera, "candidates/form.html", &context, status)
}

async fn show_form(
    id: Option<&str>,
    repo: &ApiRepository,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse {
    match candidates_service::load_candidate_form(repo, id).await {
        Ok(data) => {
            let context = base_context(flash_messages, "candidate");
            render_form(tera, context, &data, StatusCode::OK)
        }
        Err(ServiceError::Unauthorized) => redirect(UNAUTHORIZED_URL),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Candidate not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load the candidate form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/candidate/add")]
pub async fn add_candidate(
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    show_form(None, repo.get_ref(), &flash_messages, &tera).await
}

#[get("/candidate/edit/{candidate_id}")]
pub async fn edit_candidate(
    candidate_id: web::Path<String>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    show_form(Some(candidate_id.as_str()), repo.get_ref(), &flash_messages, &tera).await
}

#[post("/candidate/save")]
pub async fn save_candidate(
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CandidateForm>,
) -> impl Responder {
    let submitted = form.clone().sanitized();

    match candidates_service::save_candidate(repo.get_ref(), form).await {
        Ok(outcome) => {
            FlashMessage::success(format!(
                "{}: {} ({})",
                outcome.message, outcome.full_name, outcome.email
            ))
            .send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => redirect(UNAUTHORIZED_URL),
        Err(ServiceError::Validation { message, errors }) => {
            let mut context = base_context(&flash_messages, "candidate");
            context.insert("error_message", &message);
            let data = CandidateFormPageData::new(submitted, errors);
            render_form(&tera, context, &data, StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Candidate not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to save the candidate: {err}");
            FlashMessage::error("Failed to save the candidate.").send();
            redirect("/")
        }
    }
}

#[get("/candidate/delete/{candidate_id}")]
pub async fn delete_candidate_confirmation(
    candidate_id: web::Path<String>,
    params: web::Query<DeleteQueryParams>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match candidates_service::load_delete_confirmation(
        repo.get_ref(),
        &candidate_id,
        params.return_to.as_deref(),
    )
    .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "candidate");
            context.insert("candidate_id", &data.id);
            context.insert("name", &data.name);
            context.insert("return_to", &data.return_to);

            render_template(&tera, "candidates/delete.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect(UNAUTHORIZED_URL),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Candidate not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load the candidate: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/candidate/delete/{candidate_id}")]
pub async fn delete_candidate(
    candidate_id: web::Path<String>,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<DeleteCandidateForm>,
) -> impl Responder {
    let return_to = form.return_path();

    match candidates_service::delete_candidate(repo.get_ref(), &candidate_id, &form).await {
        Ok(DeleteOutcome::Deleted { message }) => {
            FlashMessage::success(format!("Deleted! {message}")).send();
        }
        Ok(DeleteOutcome::Cancelled) => {}
        Err(ServiceError::Unauthorized) => return redirect(UNAUTHORIZED_URL),
        Err(err) => {
            log::error!("Failed to delete the candidate: {err}");
            FlashMessage::error("Fail to Delete").send();
        }
    }
    redirect(&return_to)
}
