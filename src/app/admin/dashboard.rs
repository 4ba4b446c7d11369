use bookstore_shared::urls;
use leptos::prelude::*;
use leptos_router::components::A;

use super::{use_session, Logout};
use crate::app::shared::action_error;

const TILE_CLASSES: &str =
    "flex flex-col p-6 rounded-2xl bg-white shadow-md hover:shadow-lg border-t-8";

#[component]
fn Tile(to: &'static str, title: &'static str, text: &'static str, accent: &'static str) -> impl IntoView {
    view! {
        <A href=to attr:class=format!("{TILE_CLASSES} {accent}")>
            <span class="text-2xl font-semibold">{title}</span>
            <span class="text-stone-600">{text}</span>
        </A>
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let session = use_session();
    let greeting = move || {
        session.with(|s| match s.username() {
            Some(name) => format!("Welcome, {name}"),
            None => "Welcome".to_string(),
        })
    };
    let logout_action = ServerAction::<Logout>::new();
    Effect::new(move |_| {
        if let Some(Ok(())) = logout_action.value().get() {
            session.update(|s| *s = std::mem::take(s).logged_out());
        }
    });

    view! {
        <div class="flex flex-row justify-between items-center mb-6">
            <h1 class="text-3xl font-semibold">{greeting}</h1>
            <ActionForm action=logout_action>
                <input
                    type="submit"
                    value="Log out"
                    class="p-2 px-4 rounded-xl bg-stone-700 text-stone-50 font-bold"
                />
            </ActionForm>
        </div>
        <p class="text-red-700">{move || action_error(logout_action.value().get())}</p>
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            <Tile
                to=urls::ADD_BOOK
                title="Add book"
                text="Put a new book into the catalog"
                accent="border-emerald-600"
            />
            <Tile
                to=urls::EDIT_BOOK
                title="Edit book"
                text="Change the details or price of a book"
                accent="border-sky-600"
            />
            <Tile
                to=urls::DELETE_BOOK
                title="Delete book"
                text="Remove a book from the catalog"
                accent="border-red-600"
            />
        </div>
    }
}
