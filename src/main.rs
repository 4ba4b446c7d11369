//! Bookstore storefront and back office
//!
//! Serves the leptos app and talks to the catalog API on behalf of the browser.

#![recursion_limit = "256"]

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use std::sync::Arc;

    use axum::Router;
    use axum_login::{
        tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer},
        AuthManagerLayerBuilder,
    };
    use bookstore::app::*;
    use bookstore_server::{
        auth::CatalogAuthBackend,
        config::Config,
        signal_handler::{signal_handler, wait_for_shutdown, InShutdown},
    };
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tracing::{debug, info};
    use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

    let config = match Config::try_create() {
        Ok(x) => x,
        Err(e) => {
            panic!("Error reading config: {e}.");
        }
    };
    let config_arc = Arc::new(config);

    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // stdout always, a daily file on top if configured
    let file_layer = config_arc.log_directory.as_ref().map(|dir| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_line_number(true)
            .with_writer(tracing_appender::rolling::daily(dir, "bookstore.log"))
            .with_filter(config_arc.log_level)
    });
    let my_crate_filter = EnvFilter::new("bookstore,bookstore_server");
    let subscriber = tracing_subscriber::registry()
        .with(my_crate_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_line_number(true)
                .with_filter(config_arc.log_level),
        )
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber).expect("static tracing config");
    debug!("Tracing enabled.");
    info!("Using catalog at {}", config_arc.catalog.base_url());

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);

    let config_capsule = config_arc.clone();
    let app_core = Router::new()
        .leptos_routes_with_context(
            &config_arc.leptos_options,
            routes,
            move || {
                provide_context::<Arc<Config>>(config_capsule.clone());
            },
            {
                let leptos_options = config_arc.leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(config_arc.leptos_options.clone());

    // server functions find the session through this layer
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config_arc.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(config_arc.session_expiry));
    let backend = CatalogAuthBackend::new(config_arc.clone());
    let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();

    let app = app_core.layer(auth_layer);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(InShutdown::No);
    let signal_task = tokio::spawn(signal_handler(shutdown_tx));

    info!(
        "listening on http://{}",
        &config_arc.leptos_options.site_addr
    );
    let listener = match tokio::net::TcpListener::bind(&config_arc.leptos_options.site_addr).await {
        Ok(x) => x,
        Err(e) => {
            panic!(
                "Cannot bind to {}: {e}.",
                config_arc.leptos_options.site_addr
            );
        }
    };
    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx))
        .await
    {
        tracing::error!("Server stopped with error: {e}");
    }
    signal_task.abort();
    info!("Shutdown complete.");
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
