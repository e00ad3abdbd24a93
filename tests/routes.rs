use actix_web::cookie::Key;
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use serde_json::{Value, json};
use tera::Tera;

use candidate_admin::models::config::ServerConfig;
use candidate_admin::repository::ApiRepository;
use candidate_admin::routes::alert_level_to_str;

mod common;

use common::{FakeApi, candidate_json, envelope};

fn server_config(api: &FakeApi) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        templates_dir: "templates/**/*".into(),
        assets_dir: "./assets".into(),
        secret: "x".repeat(64),
        api_url: api.url.clone(),
        api_timeout_secs: 5,
        default_page_length: 10,
    }
}

/// Initializes the application against the fake API `$api`.
macro_rules! init_app {
    ($api:expr) => {{
        let config = server_config($api);
        let tera = Tera::new(&config.templates_dir).unwrap();
        let repo = ApiRepository::connect(&config.api_url, config.api_timeout()).unwrap();
        let message_store = CookieMessageStore::builder(Key::generate()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        test::init_service(
            App::new()
                .wrap(message_framework)
                .configure(candidate_admin::configure)
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new(repo))
                .app_data(web::Data::new(config)),
        )
        .await
    }};
}

fn location(resp: &ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn list_envelope(rows: Vec<Value>, page: usize, length: usize, total: usize) -> Value {
    envelope(
        "ok",
        json!({
            "page": page,
            "length": length,
            "totalRecords": total,
            "totalDisplayRecords": total,
            "searchKeyword": null,
            "searchColumn": null,
            "data": rows,
        }),
    )
}

fn candidate_form(id: Option<&str>, email: &str) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("full_name", "Jane Doe".to_string()),
        ("email", email.to_string()),
        ("phone_number", "08123456".to_string()),
        ("dob", "1990-01-31".to_string()),
        ("pob", "Bandung".to_string()),
        ("gender", "F".to_string()),
        ("year_exp", "".to_string()),
        ("last_salary", "7000".to_string()),
    ];
    if let Some(id) = id {
        form.push(("id", id.to_string()));
    }
    form
}

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn index_renders_the_requested_page() {
    let api = FakeApi::start(|_| {
        (
            StatusCode::OK,
            list_envelope(vec![candidate_json(4, "Ann Lee")], 2, 3, 4),
        )
    })
    .await;
    let app = init_app!(&api);

    let req = test::TestRequest::get()
        .uri("/?page=2&length=3&search=ann&search_col=full_name")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Ann Lee"));
    assert!(body.contains("ann.lee@example.com"));
    assert!(body.contains("Showing <span class=\"font-medium\">4</span>"));
    assert!(body.contains("of <span class=\"font-medium\">4</span> results"));

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/candidate/");
    assert_eq!(requests[0].query_param("start").as_deref(), Some("3"));
    assert_eq!(requests[0].query_param("length").as_deref(), Some("3"));
    assert_eq!(requests[0].query_param("search").as_deref(), Some("ann"));
    assert_eq!(
        requests[0].query_param("searchCol").as_deref(),
        Some("full_name")
    );
    assert_eq!(
        requests[0].query_param("field").as_deref(),
        Some("created_at")
    );
    assert_eq!(requests[0].query_param("sort").as_deref(), Some("desc"));

    api.stop().await;
}

#[actix_web::test]
async fn index_shows_empty_table() {
    let api = FakeApi::start(|_| (StatusCode::OK, envelope("ok", Value::Null))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("No data available"));
    assert_eq!(api.requests()[0].query_param("length").as_deref(), Some("10"));

    api.stop().await;
}

#[actix_web::test]
async fn index_search_form_keeps_the_order() {
    let api = FakeApi::start(|_| (StatusCode::OK, list_envelope(vec![], 1, 10, 0))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::get()
        .uri("/?search=ann&field=full_name&sort=asc")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("<input type=\"hidden\" name=\"field\" value=\"full_name\">"));
    assert!(body.contains("<input type=\"hidden\" name=\"sort\" value=\"asc\">"));

    let requests = api.requests();
    assert_eq!(requests[0].query_param("search").as_deref(), Some("ann"));
    assert_eq!(
        requests[0].query_param("field").as_deref(),
        Some("full_name")
    );
    assert_eq!(requests[0].query_param("sort").as_deref(), Some("asc"));

    api.stop().await;
}

#[actix_web::test]
async fn index_with_null_rows_shows_empty_table() {
    let api = FakeApi::start(|_| {
        (
            StatusCode::OK,
            envelope(
                "ok",
                json!({"page": 1, "length": 10, "totalRecords": 0, "data": null}),
            ),
        )
    })
    .await;
    let app = init_app!(&api);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("No data available"));

    api.stop().await;
}

#[actix_web::test]
async fn index_lists_rows_without_id() {
    let api = FakeApi::start(|_| {
        (
            StatusCode::OK,
            list_envelope(
                vec![json!({"full_name": "Nameless Row"}), candidate_json(4, "Ann Lee")],
                1,
                10,
                2,
            ),
        )
    })
    .await;
    let app = init_app!(&api);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Nameless Row"));
    assert!(body.contains("Ann Lee"));
    assert_eq!(body.matches(">Edit</a>").count(), 1);

    api.stop().await;
}

#[actix_web::test]
async fn index_clamps_huge_page_numbers() {
    let api = FakeApi::start(|_| (StatusCode::OK, list_envelope(vec![], 0, 0, 5))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::get()
        .uri(&format!("/?page={}", usize::MAX))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let expected_start = (usize::MAX / 10 - 1) * 10;
    assert_eq!(
        api.requests()[0].query_param("start"),
        Some(expected_start.to_string())
    );

    api.stop().await;
}

#[actix_web::test]
async fn unauthorized_api_redirects_to_unauthorized_page() {
    let api = FakeApi::start(|_| (StatusCode::UNAUTHORIZED, json!({}))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/unauthorized");

    let req = test::TestRequest::get().uri("/unauthorized").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    api.stop().await;
}

#[actix_web::test]
async fn about_page_is_static() {
    let api = FakeApi::start(|_| (StatusCode::OK, envelope("ok", Value::Null))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::get().uri("/about").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(api.requests().is_empty());

    api.stop().await;
}

#[actix_web::test]
async fn edit_form_is_prefilled() {
    let api = FakeApi::start(|_| (StatusCode::OK, envelope("ok", candidate_json(5, "Jane Doe")))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::get()
        .uri("/candidate/edit/5")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Edit candidate"));
    assert!(body.contains("value=\"Jane Doe\""));
    assert!(body.contains("name=\"id\" value=\"5\""));
    assert!(body.contains("<option value=\"F\" selected>Female</option>"));
    assert_eq!(api.requests()[0].path, "/api/candidate/5");

    api.stop().await;
}

#[actix_web::test]
async fn edit_of_missing_candidate_redirects_home() {
    let api = FakeApi::start(|_| (StatusCode::NOT_FOUND, json!({"message": "Not found"}))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::get()
        .uri("/candidate/edit/77")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    api.stop().await;
}

#[actix_web::test]
async fn save_creates_and_redirects() {
    let api = FakeApi::start(|_| {
        (
            StatusCode::OK,
            envelope("Candidate created", candidate_json(9, "Jane Doe")),
        )
    })
    .await;
    let app = init_app!(&api);

    let req = test::TestRequest::post()
        .uri("/candidate/save")
        .set_form(candidate_form(None, "Jane@Example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    let body = requests[0].body.as_ref().unwrap();
    assert_eq!(body["email"], json!("jane@example.com"));
    assert_eq!(body["year_exp"], Value::Null);
    assert!(body.get("id").is_none());

    api.stop().await;
}

#[actix_web::test]
async fn save_with_id_updates() {
    let api = FakeApi::start(|_| {
        (
            StatusCode::OK,
            envelope("Candidate updated", candidate_json(5, "Jane Doe")),
        )
    })
    .await;
    let app = init_app!(&api);

    let req = test::TestRequest::post()
        .uri("/candidate/save")
        .set_form(candidate_form(Some("5"), "jane@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let requests = api.requests();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/api/candidate/");
    assert_eq!(requests[0].body.as_ref().unwrap()["id"], json!("5"));

    api.stop().await;
}

#[actix_web::test]
async fn save_rerenders_form_with_remote_field_errors() {
    let api = FakeApi::start(|_| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "message": "The given data was invalid.",
                "errors": {"email": ["The email has already been taken."]},
            }),
        )
    })
    .await;
    let app = init_app!(&api);

    let req = test::TestRequest::post()
        .uri("/candidate/save")
        .set_form(candidate_form(None, "taken@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("The email has already been taken."));
    assert!(body.contains("value=\"taken@example.com\""));
    assert!(body.contains("value=\"Jane Doe\""));

    api.stop().await;
}

#[actix_web::test]
async fn save_with_missing_fields_does_not_call_the_api() {
    let api = FakeApi::start(|_| (StatusCode::OK, envelope("ok", Value::Null))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::post()
        .uri("/candidate/save")
        .set_form(candidate_form(None, "  "))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("The email field is required."));
    assert!(api.requests().is_empty());

    api.stop().await;
}

#[actix_web::test]
async fn delete_confirmation_names_the_candidate() {
    let api = FakeApi::start(|_| (StatusCode::OK, envelope("ok", candidate_json(3, "Ann Lee")))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::get()
        .uri("/candidate/delete/3")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Are you sure to delete Ann Lee ?"));

    api.stop().await;
}

#[actix_web::test]
async fn delete_without_confirmation_keeps_the_record() {
    let api = FakeApi::start(|_| (StatusCode::OK, envelope("ok", Value::Null))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::post()
        .uri("/candidate/delete/3")
        .set_form([("return_to", "/?page=2")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/?page=2");
    assert!(api.requests().is_empty());

    api.stop().await;
}

#[actix_web::test]
async fn confirmed_delete_calls_the_api() {
    let api = FakeApi::start(|_| (StatusCode::OK, envelope("Candidate deleted", Value::Null))).await;
    let app = init_app!(&api);

    let req = test::TestRequest::post()
        .uri("/candidate/delete/3")
        .set_form([("confirm", "yes"), ("return_to", "https://evil.example")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].path, "/api/candidate/3");

    api.stop().await;
}
