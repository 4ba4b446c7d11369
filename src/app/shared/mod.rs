//! Components used by the shop front and the back office alike

use bookstore_shared::{
    pricing::{with_currency, PriceTag},
    BookView,
};
use leptos::prelude::*;
use leptos_router::components::A;
use serde::{Deserialize, Serialize};

/// What a page shows when loading or changing data failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageError(pub String);
impl core::fmt::Display for PageError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for PageError {}
impl From<ServerFnError> for PageError {
    fn from(value: ServerFnError) -> Self {
        match value {
            // the message was written for the operator, show it unchanged
            ServerFnError::ServerError(msg) => Self(msg),
            other => Self(other.to_string()),
        }
    }
}

/// The message of a failed server action, if it failed
pub fn action_error<T>(result: Option<Result<T, ServerFnError>>) -> Option<String> {
    match result {
        Some(Err(e)) => Some(PageError::from(e).0),
        _ => None,
    }
}

#[component]
pub fn ErrorList(errors: ArcRwSignal<Errors>) -> impl IntoView {
    view! {
        <div class="p-4 m-2 rounded-xl bg-red-200 text-red-900">
            <ul>
                {move || {
                    errors
                        .get()
                        .into_iter()
                        .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                        .collect::<Vec<_>>()
                }}
            </ul>
        </div>
    }
}

#[component]
pub fn Loading(what: &'static str) -> impl IntoView {
    view! { <p class="p-4 italic text-stone-500">"Loading " {what} "..."</p> }
}

#[component]
pub fn Message(text: String) -> impl IntoView {
    view! { <p class="p-3 m-2 rounded-xl bg-emerald-200 text-emerald-900">{text}</p> }
}

#[component]
pub fn Price(tag: PriceTag) -> impl IntoView {
    let struck = tag.struck().map(|s| {
        view! { <del class="line-through text-stone-500 mr-2">{with_currency(&s)}</del> }
    });
    view! {
        <span class="font-semibold">
            {struck}
            <span class:text-red-700=tag.is_sale()>{with_currency(&tag.displayed())}</span>
        </span>
    }
}

#[component]
pub fn Badges(is_new: bool, sale: Option<String>) -> impl IntoView {
    view! {
        <span class="flex flex-row gap-1">
            {is_new
                .then(|| {
                    view! { <span class="px-2 rounded-full bg-sky-600 text-white text-sm">"New"</span> }
                })}
            {sale
                .map(|badge| {
                    view! { <span class="px-2 rounded-full bg-red-600 text-white text-sm">{badge}</span> }
                })}
        </span>
    }
}

#[component]
pub fn Cover(src: Option<String>, title: String) -> impl IntoView {
    match src {
        Some(src) => view! { <img src=src alt=title class="w-full h-48 object-cover rounded-t-xl" /> }
            .into_any(),
        None => view! {
            <div class="w-full h-48 flex items-center justify-center bg-stone-300 rounded-t-xl text-stone-600">
                "No cover"
            </div>
        }
        .into_any(),
    }
}

/// A book in a grid, linking to its detail page
#[component]
pub fn BookCard(book: BookView) -> impl IntoView {
    let href = book.detail_href();
    let badge = book.sale_badge();
    view! {
        <li class="flex flex-col bg-white rounded-xl shadow-md hover:shadow-lg">
            <A href=href>
                <Cover src=book.cover_image title=book.title.clone() />
                <div class="p-3 flex flex-col gap-1">
                    <Badges is_new=book.is_new sale=badge />
                    <h3 class="text-lg font-semibold">{book.title}</h3>
                    <p class="text-stone-600">{book.author}</p>
                    <Price tag=book.price_tag />
                </div>
            </A>
        </li>
    }
}

#[component]
pub fn BookGrid(books: Vec<BookView>, empty: &'static str) -> impl IntoView {
    if books.is_empty() {
        return view! { <p class="p-4 text-stone-500">{empty}</p> }.into_any();
    }
    view! {
        <ul class="grid grid-cols-2 md:grid-cols-4 lg:grid-cols-6 gap-4">
            {books.into_iter().map(|book| view! { <BookCard book /> }).collect_view()}
        </ul>
    }
    .into_any()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn server_messages_reach_the_page_unchanged() {
        let err = PageError::from(ServerFnError::new("Failed to fetch books"));
        assert_eq!(err.to_string(), "Failed to fetch books");
        assert_eq!(
            action_error::<()>(Some(Err(ServerFnError::new("Failed to delete book")))),
            Some("Failed to delete book".to_string())
        );
        assert_eq!(action_error(Some(Ok(3))), None);
        assert_eq!(action_error::<()>(None), None);
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn sale_price_strikes_the_original() {
        let html = view! { <Price tag=PriceTag::derive(500.0, Some(500.0), 20) /> }.to_html();
        let struck = html.find("<del").expect("original price is struck");
        let sale = html.find("400.00").expect("sale price is shown");
        assert!(html[struck..sale].contains("500"));
        assert!(!html[sale..].contains("<del"));

        let html = view! { <Price tag=PriceTag::derive(300.0, None, 0) /> }.to_html();
        assert!(!html.contains("<del"));
        assert!(html.contains("300"));
    }

    #[test]
    fn stylesheet_covers_the_price_classes() {
        let css = include_str!("../../../style/output.css");
        for class in [".line-through", ".text-red-700", ".text-stone-500", ".font-semibold"] {
            assert!(css.contains(class), "missing {class}");
        }
        assert!(css.contains("del"));
    }
}
