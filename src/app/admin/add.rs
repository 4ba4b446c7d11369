use bookstore_shared::{
    form::{BookForm, FormErrors},
    urls,
};
use leptos::prelude::*;
use leptos_router::components::A;

use super::{
    form::{check, BookFormFields},
    CreateBook,
};
use crate::app::shared::{action_error, Message};

#[component]
pub fn AddBook() -> impl IntoView {
    let form = RwSignal::new(BookForm::default());
    let errors = RwSignal::new(FormErrors::default());
    let create_action = ServerAction::<CreateBook>::new();

    let success = RwSignal::new(None::<String>);
    Effect::new(move |_| {
        if let Some(Ok(created)) = create_action.value().get() {
            success.set(Some(format!("Added \"{}\" to the catalog", created.title)));
            form.set(BookForm::default());
        }
    });

    view! {
        <A href=urls::DASHBOARD attr:class="underline text-amber-800">
            "Back to dashboard"
        </A>
        <h1 class="text-3xl font-semibold my-4">"Add book"</h1>
        {move || success.get().map(|text| view! { <Message text /> })}
        <p class="text-red-700">{move || action_error(create_action.value().get())}</p>
        <form on:submit=move |ev| {
            ev.prevent_default();
            success.set(None);
            if check(form, errors) {
                create_action.dispatch(CreateBook { form: form.get_untracked() });
            }
        }>
            <BookFormFields form errors />
            <input
                type="submit"
                value=move || if create_action.pending().get() { "Adding..." } else { "Add book" }
                disabled=move || create_action.pending().get()
                class="mt-4 p-2 px-6 rounded-xl bg-emerald-700 text-emerald-50 font-bold"
            />
        </form>
    }
}
