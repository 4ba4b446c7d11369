use bookstore_shared::{session::SessionState, urls};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::{current_admin, Login};
use crate::app::shared::action_error;

const INPUT_CLASSES: &str = "p-2 rounded-lg border border-stone-400";

#[component]
pub fn LoginPage() -> impl IntoView {
    let login_action = ServerAction::<Login>::new();
    let login_error = move || action_error(login_action.value().get());

    // already logged in: straight to the dashboard
    let session = Resource::new(|| (), |_| current_admin());
    let navigate = use_navigate();
    Effect::new(move |_| {
        let state = match session.get() {
            Some(Ok(username)) => SessionState::from_user(username),
            _ => return,
        };
        // a successful login in this page redirects on its own
        let state = match login_action.value().get() {
            Some(Ok(username)) => state.login_succeeded(username),
            _ => state,
        };
        if state.is_authenticated() {
            navigate(urls::DASHBOARD, Default::default());
        }
    });

    view! {
        <div class="flex flex-col items-center">
            <h1 class="text-3xl font-semibold m-6">"Store manager login"</h1>
            <ActionForm action=login_action>
                <div class="flex flex-col gap-3 w-80">
                    <label class="flex flex-col gap-1">
                        <span class="font-medium">"Username"</span>
                        <input type="text" name="username" autocomplete="username" class=INPUT_CLASSES />
                    </label>
                    <label class="flex flex-col gap-1">
                        <span class="font-medium">"Password"</span>
                        <input
                            type="password"
                            name="password"
                            autocomplete="current-password"
                            class=INPUT_CLASSES
                        />
                    </label>
                    <input
                        type="submit"
                        value=move || if login_action.pending().get() { "Logging in..." } else { "Log in" }
                        disabled=move || login_action.pending().get()
                        class="p-2 rounded-xl bg-amber-700 text-amber-50 font-bold"
                    />
                    <p class="text-red-700">{login_error}</p>
                </div>
            </ActionForm>
        </div>
    }
}
