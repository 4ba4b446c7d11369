//! The input fields shared by the add and edit pages

use bookstore_shared::form::{BookField, BookForm, FormErrors};
use leptos::prelude::*;

const INPUT_CLASSES: &str = "p-2 rounded-lg border border-stone-400";

#[component]
fn FieldInput(
    field: BookField,
    form: RwSignal<BookForm>,
    errors: RwSignal<FormErrors>,
) -> impl IntoView {
    let value = move || form.with(|f| f.get(field).to_string());
    let on_input = move |ev: leptos::ev::Event| {
        form.update(|f| f.set(field, event_target_value(&ev)));
        // the operator is fixing it
        errors.update(|e| e.clear(field));
    };
    let input = if field.is_multiline() {
        view! {
            <textarea
                name=field.name()
                rows=4
                class=INPUT_CLASSES
                prop:value=value
                on:input=on_input
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                name=field.name()
                type=field.input_type()
                class=INPUT_CLASSES
                prop:value=value
                on:input=on_input
            />
        }
        .into_any()
    };
    let error = move || errors.with(|e| e.get(field).map(str::to_string));
    view! {
        <label class="flex flex-col gap-1">
            <span class="font-medium">
                {field.label()} {field.is_required().then_some(" *")}
            </span>
            {input}
            <span class="text-sm text-red-700">{error}</span>
        </label>
    }
}

/// All fields of a book; validation messages appear next to their field
#[component]
pub fn BookFormFields(form: RwSignal<BookForm>, errors: RwSignal<FormErrors>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            {BookField::ALL
                .into_iter()
                .map(|field| view! { <FieldInput field form errors /> })
                .collect_view()}
            <label class="flex flex-row items-center gap-2">
                <input
                    type="checkbox"
                    name="is_new"
                    prop:checked=move || form.with(|f| f.is_new)
                    on:change=move |ev| form.update(|f| f.is_new = event_target_checked(&ev))
                />
                <span class="font-medium">"New arrival"</span>
            </label>
        </div>
    }
}

/// Check the form before sending it anywhere
///
/// Shows the problems next to the fields and returns false if there are any.
pub fn check(form: RwSignal<BookForm>, errors: RwSignal<FormErrors>) -> bool {
    match form.with(BookForm::validate) {
        Ok(_) => {
            errors.set(FormErrors::default());
            true
        }
        Err(e) => {
            errors.set(e);
            false
        }
    }
}
