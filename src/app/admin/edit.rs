//! Pick a book, change it, save it

use bookstore_shared::{
    form::{BookForm, FormErrors},
    pricing::with_currency,
    replace_book, urls, BookView,
};
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_params, params::Params};

use super::{
    form::{check, BookFormFields},
    UpdateBook,
};
use crate::app::{
    catalog::list_books,
    shared::{action_error, ErrorList, Loading, Message, PageError},
};

#[derive(Params, Clone, PartialEq)]
struct EditParams {
    id: Option<i64>,
}

#[component]
pub fn EditBook() -> impl IntoView {
    let params = use_params::<EditParams>();
    let fetched = Resource::new(
        || (),
        |_| async { list_books(None).await.map_err(PageError::from) },
    );
    // the list as this page knows it; changed in place after a successful save
    let books = RwSignal::new(Vec::<BookView>::new());
    let selected = RwSignal::new(None::<i64>);
    let form = RwSignal::new(BookForm::default());
    let errors = RwSignal::new(FormErrors::default());
    let message = RwSignal::new(None::<String>);
    let update_action = ServerAction::<UpdateBook>::new();

    let select = move |book: &BookView| {
        form.set(BookForm::from(book));
        errors.set(FormErrors::default());
        message.set(None);
        selected.set(Some(book.id));
    };

    Effect::new(move |_| {
        if let Some(Ok(list)) = fetched.get() {
            // opened as /edit-book/:id
            let wanted = params.get_untracked().ok().and_then(|p| p.id);
            if let Some(book) = wanted.and_then(|id| list.iter().find(|b| b.id == id)) {
                select(book);
            }
            books.set(list);
        }
    });
    Effect::new(move |_| {
        if let Some(Ok(updated)) = update_action.value().get() {
            let title = updated.title.clone();
            books.update(|list| {
                replace_book(list, updated);
            });
            selected.set(None);
            message.set(Some(format!("Saved \"{title}\"")));
        }
    });

    let editing_title = move || {
        let id = selected.get()?;
        books.with(|list| list.iter().find(|b| b.id == id).map(|b| b.title.clone()))
    };

    view! {
        <A href=urls::DASHBOARD attr:class="underline text-amber-800">
            "Back to dashboard"
        </A>
        <h1 class="text-3xl font-semibold my-4">"Edit book"</h1>
        {move || message.get().map(|text| view! { <Message text /> })}
        <ErrorBoundary fallback=|errors| view! { <ErrorList errors /> }>
            <Transition fallback=|| view! { <Loading what="books" /> }>
                {move || fetched.get().map(|res| res.map(|_| ()))}
                <Show
                    when=move || selected.get().is_some()
                    fallback=move || {
                        view! {
                            <table class="w-full bg-white rounded-xl shadow-md">
                                <thead>
                                    <tr class="text-left">
                                        <th class="p-2">"Title"</th>
                                        <th class="p-2">"Author"</th>
                                        <th class="p-2">"Price"</th>
                                        <th class="p-2"></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || books.get()
                                        key=|book| (book.id, book.title.clone(), book.price_tag.displayed())
                                        children=move |book| {
                                            let price = with_currency(&book.price_tag.displayed());
                                            let title = book.title.clone();
                                            let author = book.author.clone();
                                            view! {
                                                <tr class="border-t">
                                                    <td class="p-2">{title}</td>
                                                    <td class="p-2">{author}</td>
                                                    <td class="p-2">{price}</td>
                                                    <td class="p-2">
                                                        <button
                                                            class="px-3 py-1 rounded-lg bg-sky-700 text-sky-50"
                                                            on:click=move |_| select(&book)
                                                        >
                                                            "Edit"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        }
                    }
                >
                    <h2 class="text-xl mb-2">"Editing " {editing_title}</h2>
                    <p class="text-red-700">{move || action_error(update_action.value().get())}</p>
                    <form on:submit=move |ev| {
                        ev.prevent_default();
                        let Some(id) = selected.get_untracked() else {
                            return;
                        };
                        if check(form, errors) {
                            update_action.dispatch(UpdateBook { id, form: form.get_untracked() });
                        }
                    }>
                        <BookFormFields form errors />
                        <div class="flex flex-row gap-4 mt-4">
                            <input
                                type="submit"
                                value=move || if update_action.pending().get() { "Saving..." } else { "Save" }
                                disabled=move || update_action.pending().get()
                                class="p-2 px-6 rounded-xl bg-sky-700 text-sky-50 font-bold"
                            />
                            <button
                                type="button"
                                class="p-2 px-6 rounded-xl bg-stone-300"
                                on:click=move |_| {
                                    selected.set(None);
                                    errors.set(FormErrors::default());
                                }
                            >
                                "Cancel"
                            </button>
                        </div>
                    </form>
                </Show>
            </Transition>
        </ErrorBoundary>
    }
}
