//! Category menu and the books of one category

use bookstore_shared::urls;
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_params, params::Params};

use super::{list_books, list_categories};
use crate::app::shared::{BookGrid, ErrorList, Loading, PageError};

#[derive(Params, Clone, PartialEq)]
struct CategoryParams {
    category: Option<String>,
}

const MENU_ENTRY_CLASSES: &str = "px-3 py-1 rounded-full border border-amber-800";

#[component]
fn CategoryMenu(selected: Signal<Option<String>>) -> impl IntoView {
    let categories = Resource::new(
        || (),
        |_| async { list_categories().await.map_err(PageError::from) },
    );
    let is_selected = move |name: &str| {
        selected.with(|s| s.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(name)))
    };
    view! {
        <ErrorBoundary fallback=|errors| view! { <ErrorList errors /> }>
            <Transition fallback=|| view! { <Loading what="categories" /> }>
                <nav class="flex flex-row flex-wrap gap-2 mb-4">
                    <A href=urls::CATEGORIES attr:class=MENU_ENTRY_CLASSES>
                        <span class:font-bold=move || selected.with(Option::is_none)>"All"</span>
                    </A>
                    {move || {
                        categories
                            .get()
                            .map(|res| {
                                res.map(|names| {
                                    names
                                        .into_iter()
                                        .map(|name| {
                                            let href = urls::category(&name);
                                            let bold = {
                                                let name = name.clone();
                                                move || is_selected(&name)
                                            };
                                            view! {
                                                <A href=href attr:class=MENU_ENTRY_CLASSES>
                                                    <span class:font-bold=bold>{name}</span>
                                                </A>
                                            }
                                        })
                                        .collect_view()
                                })
                            })
                    }}
                </nav>
            </Transition>
        </ErrorBoundary>
    }
}

/// `/categories` shows every book, `/categories/:category` only those of one category
#[component]
pub fn CategoryPage() -> impl IntoView {
    let params = use_params::<CategoryParams>();
    let selected = Signal::derive(move || {
        params
            .read()
            .as_ref()
            .ok()
            .and_then(|p| p.category.clone())
            .filter(|c| !c.trim().is_empty())
    });
    let books = Resource::new(
        move || selected.get(),
        |category| async move { list_books(category).await.map_err(PageError::from) },
    );
    let heading = move || selected.get().unwrap_or("All categories".to_string());
    view! {
        <h1 class="text-3xl font-semibold mb-4">{heading}</h1>
        <CategoryMenu selected />
        <ErrorBoundary fallback=|errors| view! { <ErrorList errors /> }>
            <Transition fallback=|| view! { <Loading what="books" /> }>
                {move || {
                    books
                        .get()
                        .map(|res| {
                            res.map(|books| {
                                view! { <BookGrid books empty="No books in this category." /> }
                            })
                        })
                }}
            </Transition>
        </ErrorBoundary>
    }
}
