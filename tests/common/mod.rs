//! Local actix-web server standing in for the remote candidate API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

/// Request as received by the fake API.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub accept: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Value of the query parameter `name`.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let url = reqwest::Url::parse(&format!("http://fake/?{}", self.query)).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

type Responder = dyn Fn(&RecordedRequest) -> (StatusCode, Value) + Send + Sync;

struct FakeState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    respond: Box<Responder>,
}

pub struct FakeApi {
    /// Base URL of the API, ending with `/api/`.
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl FakeApi {
    /// Starts a server answering every request with `respond`.
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(FakeState {
            requests: requests.clone(),
            respond: Box::new(respond),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .default_service(web::to(record))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake API");
        let addr = server.addrs()[0];

        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            url: format!("http://{addr}/api/"),
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn record(req: HttpRequest, body: web::Bytes, state: web::Data<FakeState>) -> HttpResponse {
    let recorded = RecordedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        accept: req
            .headers()
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };

    let (status, payload) = (state.respond)(&recorded);
    state.requests.lock().unwrap().push(recorded);

    HttpResponse::build(status).json(payload)
}

/// Success envelope around `data`.
pub fn envelope(message: &str, data: Value) -> Value {
    json!({
        "code": 200,
        "data": data,
        "message": message,
        "title": "Success",
        "type": "success",
    })
}

pub fn candidate_json(id: u32, full_name: &str) -> Value {
    json!({
        "id": id,
        "full_name": full_name,
        "email": format!("{}@example.com", full_name.to_lowercase().replace(' ', ".")),
        "phone_number": "08123456",
        "dob": "1990-01-31",
        "pob": "Jakarta",
        "gender": "F",
        "year_exp": 4,
        "last_salary": null,
        "createdDate": "2023-05-01",
    })
}
