//! Helpers for server functions

use std::sync::Arc;

use bookstore_server::{
    auth::{AdminUser, AuthSession},
    catalog::CatalogError,
    config::Config,
};
use leptos::prelude::*;

pub fn config() -> Result<Arc<Config>, ServerFnError> {
    use_context::<Arc<Config>>().ok_or(ServerFnError::new("Unable to get config from context"))
}

/// Log the details, show the operator only what failed
pub fn catalog_failure(e: CatalogError) -> ServerFnError {
    tracing::warn!("{e}");
    ServerFnError::new(e.operation().to_string())
}

pub async fn auth_session() -> Result<AuthSession, ServerFnError> {
    match leptos_axum::extract::<AuthSession>().await {
        Ok(x) => Ok(x),
        Err(e) => {
            let msg = format!("Failed to get AuthSession: {e}");
            tracing::warn!(msg);
            Err(ServerFnError::new(msg))
        }
    }
}

/// The store manager behind this request, or an error if nobody is logged in
pub async fn require_admin() -> Result<AdminUser, ServerFnError> {
    let Some(user) = auth_session().await?.user else {
        return Err(ServerFnError::new(
            "You must be logged in to change the catalog",
        ));
    };
    Ok(user)
}
