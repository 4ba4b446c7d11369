//! The back office server functions over http, behind the same session layers as the shop

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    response::IntoResponse,
    routing::post,
    Router,
};
use axum_login::{
    tower_sessions::{MemoryStore, SessionManagerLayer},
    AuthManagerLayerBuilder,
};
use bookstore_server::{
    auth::CatalogAuthBackend,
    catalog::fake::{self, Shared},
    config::Config,
};
use leptos::{prelude::provide_context, server_fn::ServerFn};
use reqwest::{
    header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    redirect::Policy,
    StatusCode,
};

use super::{CurrentAdmin, DeleteBook, Login};

async fn server_fn_handler(
    State(config): State<Arc<Config>>,
    request: Request<Body>,
) -> impl IntoResponse {
    leptos_axum::handle_server_fns_with_context(move || provide_context(config.clone()), request)
        .await
}

/// Serve the server functions on a free local port, talking to a fresh fake catalog
async fn spawn_shop() -> (String, Shared) {
    let (catalog_url, catalog) = fake::spawn().await;
    let config = Config::from_toml(&format!("[catalog]\nbase_url = \"{catalog_url}\"\n")).unwrap();
    let config = Arc::new(config);

    let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);
    let backend = CatalogAuthBackend::new(config.clone());
    let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();
    let app = Router::new()
        .route("/api/{*fn_name}", post(server_fn_handler))
        .with_state(config)
        .layer(auth_layer);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), catalog)
}

struct Reply {
    status: StatusCode,
    /// `name=value` of the session cookie, if the response set one
    cookie: Option<String>,
    body: String,
}

async fn call(shop: &str, path: &str, body: &str, cookie: Option<&str>) -> Reply {
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap();
    let mut request = client
        .post(format!("{shop}{path}"))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string());
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    let response = request.send().await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    let body = response.text().await.unwrap();
    Reply {
        status,
        cookie,
        body,
    }
}

async fn log_in(shop: &str, password: &str) -> Reply {
    let body = format!("username={}&password={password}", fake::USERNAME);
    call(shop, Login::PATH, &body, None).await
}

#[tokio::test]
async fn anonymous_delete_is_refused() {
    let (shop, catalog) = spawn_shop().await;

    let reply = call(&shop, DeleteBook::PATH, "id=2", None).await;
    assert!(!reply.status.is_success());
    assert!(
        reply.body.contains("You must be logged in to change the catalog"),
        "{}",
        reply.body
    );
    assert!(catalog.lock().await.books.iter().any(|b| b.id == 2));

    let reply = call(&shop, CurrentAdmin::PATH, "", None).await;
    assert!(reply.status.is_success());
    assert_eq!(reply.body, "null");
}

#[tokio::test]
async fn login_opens_the_back_office() {
    let (shop, catalog) = spawn_shop().await;

    let reply = log_in(&shop, fake::PASSWORD).await;
    assert!(
        reply.status.is_success() || reply.status.is_redirection(),
        "{}: {}",
        reply.status,
        reply.body
    );
    let cookie = reply.cookie.expect("a successful login sets the session cookie");

    let reply = call(&shop, CurrentAdmin::PATH, "", Some(&cookie)).await;
    assert_eq!(reply.body, format!("\"{}\"", fake::USERNAME));

    let reply = call(&shop, DeleteBook::PATH, "id=2", Some(&cookie)).await;
    assert!(reply.status.is_success(), "{}: {}", reply.status, reply.body);
    assert_eq!(reply.body, "2");
    assert!(!catalog.lock().await.books.iter().any(|b| b.id == 2));
}

#[tokio::test]
async fn rejected_login_leaves_the_session_unset() {
    let (shop, catalog) = spawn_shop().await;

    let reply = log_in(&shop, "wrong").await;
    assert!(!reply.status.is_success());
    assert!(reply.body.contains("Invalid username or password"), "{}", reply.body);

    // whatever cookie came back does not open anything
    let cookie = reply.cookie;
    let reply = call(&shop, CurrentAdmin::PATH, "", cookie.as_deref()).await;
    assert_eq!(reply.body, "null");
    let reply = call(&shop, DeleteBook::PATH, "id=1", cookie.as_deref()).await;
    assert!(reply.body.contains("You must be logged in to change the catalog"));
    assert_eq!(catalog.lock().await.books.len(), 3);
}
