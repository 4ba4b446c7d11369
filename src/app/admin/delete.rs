use bookstore_shared::{remove_book, urls, BookView};
use leptos::prelude::*;
use leptos_router::components::A;

use super::DeleteBook as DeleteBookAction;
use crate::app::{
    catalog::list_books,
    shared::{action_error, ErrorList, Loading, Message, PageError},
};

/// Ask the browser for confirmation; no window (or no answer) means no
fn confirm_delete(book: &BookView) -> bool {
    window()
        .confirm_with_message(&format!(
            "Delete \"{}\" by {}? This cannot be undone.",
            book.title, book.author
        ))
        .unwrap_or(false)
}

#[component]
pub fn DeleteBook() -> impl IntoView {
    let fetched = Resource::new(
        || (),
        |_| async { list_books(None).await.map_err(PageError::from) },
    );
    let books = RwSignal::new(Vec::<BookView>::new());
    let message = RwSignal::new(None::<String>);
    let delete_action = ServerAction::<DeleteBookAction>::new();

    Effect::new(move |_| {
        if let Some(Ok(list)) = fetched.get() {
            books.set(list);
        }
    });
    Effect::new(move |_| {
        if let Some(Ok(id)) = delete_action.value().get() {
            let title = books.with_untracked(|list| {
                list.iter()
                    .find(|b| b.id == id)
                    .map(|b| b.title.clone())
            });
            books.update(|list| remove_book(list, id));
            if let Some(title) = title {
                message.set(Some(format!("Deleted \"{title}\"")));
            }
        }
    });

    view! {
        <A href=urls::DASHBOARD attr:class="underline text-amber-800">
            "Back to dashboard"
        </A>
        <h1 class="text-3xl font-semibold my-4">"Delete book"</h1>
        {move || message.get().map(|text| view! { <Message text /> })}
        <p class="text-red-700">{move || action_error(delete_action.value().get())}</p>
        <ErrorBoundary fallback=|errors| view! { <ErrorList errors /> }>
            <Transition fallback=|| view! { <Loading what="books" /> }>
                {move || fetched.get().map(|res| res.map(|_| ()))}
                <Show
                    when=move || books.with(|b| !b.is_empty())
                    fallback=|| view! { <p class="text-stone-500">"The catalog is empty."</p> }
                >
                    <ul class="flex flex-col gap-2">
                        <For
                            each=move || books.get()
                            key=|book| book.id
                            children=move |book| {
                                let label = format!("{} by {}", book.title, book.author);
                                let edit_href = urls::edit_book(book.id);
                                view! {
                                    <li class="flex flex-row justify-between items-center gap-2 p-2 bg-white rounded-xl shadow-sm">
                                        <span class="grow">{label}</span>
                                        <A href=edit_href attr:class="px-3 py-1 rounded-lg bg-sky-700 text-sky-50">
                                            "Edit"
                                        </A>
                                        <button
                                            class="px-3 py-1 rounded-lg bg-red-700 text-red-50 disabled:opacity-50"
                                            disabled=move || delete_action.pending().get()
                                            on:click=move |_| {
                                                message.set(None);
                                                if confirm_delete(&book) {
                                                    delete_action.dispatch(DeleteBookAction { id: book.id });
                                                }
                                            }
                                        >
                                            "Delete"
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Transition>
        </ErrorBoundary>
    }
}
