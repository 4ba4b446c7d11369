//! Keyword search over title and author

use leptos::{html, prelude::*};
use leptos_router::hooks::query_signal;

use super::search_books;
use crate::app::shared::{BookGrid, ErrorList, Loading, PageError};

#[component]
pub fn SearchPage() -> impl IntoView {
    let (query, set_query) = query_signal::<String>("q");
    let keyword = Memo::new(move |_| query.get().map(|q| q.trim().to_string()).unwrap_or_default());
    let results = Resource::new(
        move || keyword.get(),
        |keyword| async move {
            // nothing to search for, so nothing to ask the catalog
            if keyword.is_empty() {
                return Ok(None);
            }
            search_books(keyword)
                .await
                .map(Some)
                .map_err(PageError::from)
        },
    );
    let search_ref = NodeRef::<html::Input>::new();
    view! {
        <h1 class="text-3xl font-semibold mb-4">"Search"</h1>
        <form
            class="flex flex-row max-w-xl mb-4"
            on:submit=move |ev| {
                ev.prevent_default();
                let value = search_ref.get().expect("statically linked to the dom").value();
                set_query.set(if value.trim().is_empty() { None } else { Some(value) });
            }
        >
            <input
                node_ref=search_ref
                type="search"
                name="q"
                prop:value=move || query.get().unwrap_or_default()
                class="grow p-2 rounded-l-xl border border-stone-400"
            />
            <input
                type="submit"
                value="Search"
                class="p-2 rounded-r-xl bg-amber-700 text-amber-50 font-bold"
            />
        </form>
        <ErrorBoundary fallback=|errors| view! { <ErrorList errors /> }>
            <Transition fallback=|| view! { <Loading what="results" /> }>
                {move || {
                    results
                        .get()
                        .map(|res| {
                            res.map(|found| match found {
                                Some(books) => {
                                    view! {
                                        <p class="mb-2 text-stone-600">
                                            {format!("Results for \"{}\"", keyword.get_untracked())}
                                        </p>
                                        <BookGrid books empty="No books match your search." />
                                    }
                                        .into_any()
                                }
                                None => {
                                    view! {
                                        <p class="text-stone-500">
                                            "Enter a title or author to search."
                                        </p>
                                    }
                                        .into_any()
                                }
                            })
                        })
                }}
            </Transition>
        </ErrorBoundary>
    }
}
