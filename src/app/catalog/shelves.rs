use bookstore_shared::Shelf;
use leptos::prelude::*;

use super::list_shelf;
use crate::app::shared::{BookGrid, ErrorList, Loading, PageError};

/// One curated shelf of the home page
#[component]
pub fn ShelfSection(shelf: Shelf) -> impl IntoView {
    let books = Resource::new(
        move || shelf,
        |shelf| async move { list_shelf(shelf).await.map_err(PageError::from) },
    );
    view! {
        <section class="mb-8">
            <h2 class="text-2xl font-semibold mb-2">{shelf.heading()}</h2>
            <ErrorBoundary fallback=|errors| view! { <ErrorList errors /> }>
                <Transition fallback=move || view! { <Loading what=shelf.noun() /> }>
                    {move || {
                        books
                            .get()
                            .map(|res| {
                                res.map(|books| view! { <BookGrid books empty="Nothing here right now." /> })
                            })
                    }}
                </Transition>
            </ErrorBoundary>
        </section>
    }
}
