//! Store manager authentication
//!
//! The catalog decides whether a username/password pair is valid. We only remember who logged in,
//! so that the session cookie alone authorizes later changes to the catalog.

use std::{collections::HashMap, sync::Arc};

use axum_login::{AuthUser, AuthnBackend, UserId};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    catalog::{CatalogClient, CatalogError},
    config::Config,
};

/// A store manager with a live session
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub username: String,
    /// whatever the catalog answered to the login
    ///
    /// A new login replaces it, which invalidates sessions created with the old reply.
    reply: String,
}
impl core::fmt::Debug for AdminUser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminUser")
            .field("username", &self.username)
            .field("reply", &"[redacted]")
            .finish()
    }
}

impl AuthUser for AdminUser {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.username.clone()
    }

    fn session_auth_hash(&self) -> &[u8] {
        self.reply.as_bytes()
    }
}

/// What the login form submits
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// The types of Problems that can occur while logging in
#[derive(Debug)]
pub enum BackendError {
    /// The catalog could not be asked; this is not the same as rejected credentials
    Catalog(CatalogError),
}
impl core::fmt::Display for BackendError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Catalog(e) => {
                write!(f, "Failure while checking credentials with the catalog: {e}")
            }
        }
    }
}
impl std::error::Error for BackendError {}

#[derive(Debug, Clone)]
pub struct CatalogAuthBackend {
    catalog: CatalogClient,
    /// users that logged in since this server started, by username
    users: Arc<RwLock<HashMap<String, AdminUser>>>,
}

impl CatalogAuthBackend {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_client(config.catalog.clone())
    }

    pub fn with_client(catalog: CatalogClient) -> Self {
        Self {
            catalog,
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl AuthnBackend for CatalogAuthBackend {
    type User = AdminUser;
    type Credentials = Credentials;
    type Error = BackendError;

    async fn authenticate(
        &self,
        creds: Self::Credentials,
    ) -> Result<Option<Self::User>, Self::Error> {
        let username = creds.username.trim();
        if username.is_empty() || creds.password.is_empty() {
            return Ok(None);
        }
        let reply = match self.catalog.login(username, &creds.password).await {
            Ok(reply) => reply,
            // the catalog rejected the credentials
            Err(CatalogError::BadStatusCode(_, status)) if status.is_client_error() => {
                tracing::info!("Rejected login for {username} ({status})");
                return Ok(None);
            }
            Err(e) => return Err(BackendError::Catalog(e)),
        };
        let user = AdminUser {
            username: username.to_string(),
            reply,
        };
        self.users
            .write()
            .await
            .insert(user.username.clone(), user.clone());
        tracing::info!("{} logged in", user.username);
        Ok(Some(user))
    }

    async fn get_user(&self, user_id: &UserId<Self>) -> Result<Option<Self::User>, Self::Error> {
        Ok(self.users.read().await.get(user_id).cloned())
    }
}

// We use a type alias for convenience.
pub type AuthSession = axum_login::AuthSession<CatalogAuthBackend>;
