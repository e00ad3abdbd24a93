use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::models::config::{MIN_SECRET_LENGTH, ServerConfig};
use crate::repository::ApiRepository;
use crate::routes::candidates::{
    add_candidate, delete_candidate, delete_candidate_confirmation, edit_candidate,
    save_candidate,
};
use crate::routes::main::{show_about, show_index, show_unauthorized};

/// Registers every page of the application on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(show_index)
        .service(show_about)
        .service(show_unauthorized)
        .service(add_candidate)
        .service(edit_candidate)
        .service(save_candidate)
        .service(delete_candidate_confirmation)
        .service(delete_candidate);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    if server_config.secret.len() < MIN_SECRET_LENGTH {
        return Err(std::io::Error::other(format!(
            "The secret must be at least {MIN_SECRET_LENGTH} bytes long"
        )));
    }

    let repo = ApiRepository::connect(&server_config.api_url, server_config.api_timeout())
        .map_err(|e| std::io::Error::other(format!("Failed to build the API client: {e}")))?;
    log::info!("Using candidate API at {}", repo.client().base_url());

    // Signing key for the flash message cookies.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", &server_config.assets_dir))
            .configure(configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
