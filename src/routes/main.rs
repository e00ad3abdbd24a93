use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::candidates::IndexQuery;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{
    UNAUTHORIZED_URL, base_context, redirect, render_template, render_template_with_status,
};
use crate::services::{ServiceError, candidates as candidates_service};

#[get("/")]
pub async fn show_index(
    params: web::Query<IndexQuery>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match candidates_service::load_index_page(
        repo.get_ref(),
        params.into_inner(),
        server_config.default_page_length,
    )
    .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "index");
            context.insert("table", &data.table);
            context.insert("search", &data.search);
            context.insert("search_columns", &data.search_columns);
            context.insert("length", &data.length);
            context.insert("field", &data.field);
            context.insert("sort", &data.sort);
            context.insert("current_url", &data.current_url);

            render_template(&tera, "main/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect(UNAUTHORIZED_URL),
        Err(err) => {
            log::error!("Failed to list candidates: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/about")]
pub async fn show_about(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "about");
    render_template(&tera, "main/about.html", &context)
}

#[get("/unauthorized")]
pub async fn show_unauthorized(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "unauthorized");
    render_template_with_status(
        &tera,
        "main/unauthorized.html",
        &context,
        StatusCode::UNAUTHORIZED,
    )
}
