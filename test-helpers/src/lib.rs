pub mod mock;
mod store;
pub mod telemetry;

pub use store::{Confirmation, WebhookStore};

use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use futures::TryStreamExt;
use payloads::WebhookClient;
use serde::Deserialize;
use std::net::TcpListener;

pub const RETRIEVE_PATH: &str = "/webhook/booking-details";
pub const CONFIRM_PATH: &str = "/webhook/booking-confirm";

pub struct TestWebhook {
    pub port: u16,
    /// Client aimed at this server's endpoints.
    pub client: WebhookClient,
    pub store: WebhookStore,
}

/// Base address of a stand-in webhook server on `port`.
pub fn address(port: u16) -> String {
    format!("http://127.0.0.1:{port}")
}

/// A client aimed at the stand-in endpoints under `address`.
pub fn client_for(address: &str) -> WebhookClient {
    WebhookClient::new(
        format!("{address}{RETRIEVE_PATH}"),
        format!("{address}{CONFIRM_PATH}"),
    )
}

impl TestWebhook {
    /// A page address carrying `token`, as the UI would be opened with.
    pub fn page_url(&self, token: &str) -> String {
        format!("http://127.0.0.1:8080/?token={token}")
    }
}

/// Build the stand-in webhook server, but not await it.
///
/// Binding to port 0 lets the OS pick; the bound port is returned.
pub fn build(port: u16, store: WebhookStore) -> std::io::Result<(Server, u16)> {
    let listener = TcpListener::bind(("127.0.0.1", port))?;
    let port = listener.local_addr()?.port();
    let store = web::Data::new(store);

    let server = HttpServer::new(move || {
        // The UI is served from another origin during development
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .route(RETRIEVE_PATH, web::get().to(retrieve))
            .route(CONFIRM_PATH, web::post().to(confirm))
            .app_data(store.clone())
    })
    .workers(1)
    .listen(listener)?
    .run();
    Ok((server, port))
}

pub async fn spawn_webhook_on_port(port: u16) -> TestWebhook {
    telemetry::init_test_subscriber();

    let store = WebhookStore::default();
    let (server, port) = build(port, store.clone()).unwrap();
    tokio::spawn(server);

    TestWebhook {
        port,
        client: client_for(&address(port)),
        store,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_webhook() -> TestWebhook {
    spawn_webhook_on_port(0).await
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

async fn retrieve(
    store: web::Data<WebhookStore>,
    query: web::Query<TokenQuery>,
) -> HttpResponse {
    match store.retrieve(query.token.as_deref()) {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(status) => failure(status),
    }
}

async fn confirm(
    store: web::Data<WebhookStore>,
    mut payload: Multipart,
) -> Result<HttpResponse, actix_web::Error> {
    let mut fields = Confirmation::new();
    while let Some(mut field) = payload.try_next().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            bytes.extend_from_slice(&chunk);
        }
        fields.insert(name, String::from_utf8_lossy(&bytes).into_owned());
    }

    match store.confirm(fields) {
        Ok(()) => Ok(HttpResponse::Ok()
            .json(serde_json::json!({ "message": "Booking confirmed" }))),
        Err(status) => Ok(failure(status)),
    }
}

fn failure(status: u16) -> HttpResponse {
    let status =
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    tracing::debug!("Stand-in webhook answering {status}");
    HttpResponse::build(status).body(status.to_string())
}

/// Assert that a client call failed with a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: u16,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code.as_u16(), expected)
        }
        _ => panic!("Expected APIError"),
    };
}
