//! The back office: login and the pages that change the catalog

// route paths
// /login
// /store-manager
//      /dashboard
//      /add-book
//      /edit-book
//          /:id
//      /delete-book

use bookstore_shared::{form::BookForm, session::SessionState, BookView};
use leptos::prelude::*;
use leptos_router::{
    components::{Outlet, ParentRoute, Route},
    hooks::use_navigate,
    path, MatchNestedRoutes, NavigateOptions,
};

use crate::app::shared::Loading;

mod add;
mod dashboard;
mod delete;
mod edit;
mod form;
pub mod login;

// include tests
#[cfg(all(test, feature = "ssr"))]
mod test;

/// Who is logged in on this session, if anyone
#[server]
pub async fn current_admin() -> Result<Option<String>, ServerFnError> {
    use crate::app::server::auth_session;
    Ok(auth_session().await?.user.map(|u| u.username))
}

/// Check the credentials with the catalog and remember the store manager in the session
#[server]
pub async fn login(username: String, password: String) -> Result<String, ServerFnError> {
    use crate::app::server::auth_session;
    use bookstore_server::auth::Credentials;

    let mut auth_session = auth_session().await?;
    let user = match auth_session
        .authenticate(Credentials { username, password })
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(ServerFnError::new("Invalid username or password"));
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            return Err(ServerFnError::new("Failed to log in"));
        }
    };
    if let Err(e) = auth_session.login(&user).await {
        tracing::error!("Unable to store session for {}: {e}", user.username);
        return Err(ServerFnError::new("Failed to log in"));
    }
    leptos_axum::redirect(bookstore_shared::urls::DASHBOARD);
    Ok(user.username)
}

#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use crate::app::server::auth_session;

    let mut auth_session = auth_session().await?;
    match auth_session.logout().await {
        Ok(Some(user)) => tracing::info!("{} logged out", user.username),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to logout a user: {e}");
            return Err(ServerFnError::new("Failed to log out"));
        }
    }
    leptos_axum::redirect(bookstore_shared::urls::LOGIN);
    Ok(())
}

#[server]
pub async fn create_book(form: BookForm) -> Result<BookView, ServerFnError> {
    use crate::app::server::{catalog_failure, config, require_admin};

    let user = require_admin().await?;
    let payload = form
        .validate()
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let config = config()?;
    let created = config
        .catalog
        .create_book(&payload)
        .await
        .map_err(catalog_failure)?;
    tracing::info!("{} added book {} ({})", user.username, created.id, created.title);
    Ok(created)
}

#[server]
pub async fn update_book(id: i64, form: BookForm) -> Result<BookView, ServerFnError> {
    use crate::app::server::{catalog_failure, config, require_admin};

    let user = require_admin().await?;
    let payload = form
        .validate()
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let config = config()?;
    let updated = config
        .catalog
        .update_book(id, &payload)
        .await
        .map_err(catalog_failure)?;
    tracing::info!("{} updated book {id}", user.username);
    Ok(updated)
}

/// Returns the id of the deleted book
#[server]
pub async fn delete_book(id: i64) -> Result<i64, ServerFnError> {
    use crate::app::server::{catalog_failure, config, require_admin};

    let user = require_admin().await?;
    let config = config()?;
    config
        .catalog
        .delete_book(id)
        .await
        .map_err(catalog_failure)?;
    tracing::info!("{} deleted book {id}", user.username);
    Ok(id)
}

/// Render `children` only for a logged in store manager, send everyone else to the login
///
/// Provides the [`SessionState`] as context to everything inside.
#[component]
pub fn AdminGate(children: ChildrenFn) -> impl IntoView {
    let session_state = RwSignal::new(SessionState::default());
    provide_context(session_state);
    let session = Resource::new(|| (), |_| current_admin());

    let navigate = use_navigate();
    Effect::new(move |_| match session.get() {
        Some(Ok(username)) => {
            let state = SessionState::from_user(username);
            if let Some(to) = state.mount_redirect() {
                navigate(to, NavigateOptions::default());
            }
            session_state.set(state);
        }
        Some(Err(e)) => {
            leptos::logging::warn!("Unable to check session: {e}");
            navigate(bookstore_shared::urls::LOGIN, NavigateOptions::default());
        }
        None => {}
    });

    view! {
        <Transition fallback=|| view! { <Loading what="session" /> }>
            {move || {
                let children = children.clone();
                session
                    .get()
                    .map(move |res| match res {
                        Ok(Some(_)) => children().into_any(),
                        _ => view! { <p class="p-4">"Redirecting to login..."</p> }.into_any(),
                    })
            }}
        </Transition>
    }
}

/// The session of the surrounding [`AdminGate`]
pub fn use_session() -> RwSignal<SessionState> {
    use_context::<RwSignal<SessionState>>().expect("AdminGate provides SessionState")
}

#[component(transparent)]
pub fn AdminRouter() -> impl MatchNestedRoutes + Clone {
    // every page checks the session when it is mounted
    view! {
        <ParentRoute path=path!("store-manager") view=Outlet>
            <Route
                path=path!("dashboard")
                view=|| view! { <AdminGate><dashboard::Dashboard /></AdminGate> }
            />
            <Route
                path=path!("add-book")
                view=|| view! { <AdminGate><add::AddBook /></AdminGate> }
            />
            <Route
                path=path!("edit-book")
                view=|| view! { <AdminGate><edit::EditBook /></AdminGate> }
            />
            <Route
                path=path!("edit-book/:id")
                view=|| view! { <AdminGate><edit::EditBook /></AdminGate> }
            />
            <Route
                path=path!("delete-book")
                view=|| view! { <AdminGate><delete::DeleteBook /></AdminGate> }
            />
        </ParentRoute>
    }
    .into_inner()
}
