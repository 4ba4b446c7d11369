//! The full book list and the detail page of a single book

use bookstore_shared::{pricing::with_currency, urls, BookView};
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_params, params::Params};

use super::{get_book, list_books};
use crate::app::shared::{Badges, BookGrid, Cover, ErrorList, Loading, PageError, Price};

#[derive(Params, Clone, PartialEq)]
struct BookParams {
    id: Option<i64>,
}

#[component]
pub fn BookList() -> impl IntoView {
    let books = Resource::new(
        || (),
        |_| async { list_books(None).await.map_err(PageError::from) },
    );
    view! {
        <h1 class="text-3xl font-semibold mb-4">"All books"</h1>
        <ErrorBoundary fallback=|errors| view! { <ErrorList errors /> }>
            <Transition fallback=|| view! { <Loading what="books" /> }>
                {move || {
                    books
                        .get()
                        .map(|res| {
                            res.map(|books| view! { <BookGrid books empty="No books yet." /> })
                        })
                }}
            </Transition>
        </ErrorBoundary>
    }
}

#[component]
pub fn BookDetail() -> impl IntoView {
    let params = use_params::<BookParams>();
    let book = Resource::new(
        move || params.read().as_ref().ok().and_then(|p| p.id),
        |id| async move {
            match id {
                Some(id) => get_book(id).await.map_err(PageError::from),
                // not a number, so certainly not a book
                None => Ok(None),
            }
        },
    );
    view! {
        <A href=urls::BOOKS attr:class="underline text-amber-800">
            "Back to all books"
        </A>
        <ErrorBoundary fallback=|errors| view! { <ErrorList errors /> }>
            <Transition fallback=|| view! { <Loading what="book" /> }>
                {move || {
                    book.get()
                        .map(|res| {
                            res.map(|found| match found {
                                Some(book) => view! { <BookDetailCard book /> }.into_any(),
                                None => {
                                    view! { <p class="p-6 text-2xl">"Book not found"</p> }.into_any()
                                }
                            })
                        })
                }}
            </Transition>
        </ErrorBoundary>
    }
}

#[component]
fn DetailRow(label: &'static str, value: Option<String>) -> impl IntoView {
    value.map(|value| {
        view! {
            <tr>
                <th class="text-left pr-4 font-medium text-stone-600">{label}</th>
                <td>{value}</td>
            </tr>
        }
    })
}

#[component]
fn BookDetailCard(book: BookView) -> impl IntoView {
    let badge = book.sale_badge();
    let category_link = book.category.clone().map(|c| {
        view! {
            <A href=urls::category(&c) attr:class="underline text-amber-800">
                {c}
            </A>
        }
    });
    let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
    view! {
        <article class="flex flex-col md:flex-row gap-6 mt-4 bg-white rounded-xl shadow-md p-4">
            <div class="md:w-1/3">
                <Cover src=book.cover_image.clone() title=book.title.clone() />
            </div>
            <div class="md:w-2/3 flex flex-col gap-2">
                <Badges is_new=book.is_new sale=badge />
                <h1 class="text-4xl font-semibold">{book.title.clone()}</h1>
                <p class="text-xl text-stone-600">"by " {book.author.clone()}</p>
                <p class="text-2xl">
                    <Price tag=book.price_tag />
                </p>
                <p>{category_link}</p>
                <table>
                    <tbody>
                        <DetailRow label="ISBN" value=non_empty(&book.isbn) />
                        <DetailRow label="Year" value=(book.year > 0).then(|| book.year.to_string()) />
                        <DetailRow
                            label="Regular price"
                            value=book.price_tag.is_sale().then(|| with_currency(&book.price.to_string()))
                        />
                        <DetailRow
                            label="Discount"
                            value=book.price_tag.is_sale().then(|| format!("{}%", book.discount))
                        />
                        <DetailRow label="Pages" value=book.pages.map(|p| p.to_string()) />
                        <DetailRow label="Language" value=non_empty(&book.language) />
                        <DetailRow label="Publisher" value=non_empty(&book.publisher) />
                        <DetailRow
                            label="Rating"
                            value=Some(format!("{:.1} / 5 ({} reviews)", book.rating, book.reviews_count))
                        />
                    </tbody>
                </table>
                {book.description.map(|d| view! { <p class="mt-4 whitespace-pre-line">{d}</p> })}
            </div>
        </article>
    }
}
