//! Helpers for integration tests.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::Value;

struct StubState {
    status: StatusCode,
    received: Arc<Mutex<Vec<Value>>>,
}

/// Local stand-in for the catalog service recording every posted body.
pub struct CatalogStub {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
    handle: ServerHandle,
}

impl CatalogStub {
    /// Start a stub answering every `POST /products` with `status`.
    pub fn start(status: StatusCode) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            status,
            received: received.clone(),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/products", web::post().to(record))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind catalog stub.");
        let address = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        CatalogStub {
            url: format!("http://{address}/products"),
            received,
            handle,
        }
    }

    /// Bodies received so far.
    pub fn received(&self) -> Vec<Value> {
        self.received
            .lock()
            .expect("Catalog stub lock poisoned.")
            .clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn record(body: web::Json<Value>, state: web::Data<StubState>) -> HttpResponse {
    state
        .received
        .lock()
        .expect("Catalog stub lock poisoned.")
        .push(body.into_inner());
    HttpResponse::build(state.status).finish()
}

/// URL of a local port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to reserve a port.");
    let address = listener.local_addr().expect("Failed to read local address.");
    drop(listener);
    format!("http://{address}/products")
}
