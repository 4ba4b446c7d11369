use bookstore_shared::{urls, Shelf};
use leptos::{ev::keydown, html, prelude::*};
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes, A},
    path, StaticSegment,
};
use leptos_use::{use_document, use_event_listener};

use catalog::{
    books::{BookDetail, BookList},
    categories::CategoryPage,
    search::SearchPage,
    shelves::ShelfSection,
};

mod admin;
mod catalog;
#[cfg(feature = "ssr")]
mod server;
pub mod shared;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

const NAVBAR_LINK_CLASSES: &str =
    "p-2 pl-4 pr-4 hover:bg-amber-700 bg-amber-800 rounded-2xl text-lg font-bold m-2 text-center shadow-md text-amber-50";

/// The search box in the navigation bar; `/` focuses it from anywhere
#[derive(Clone, Copy)]
struct SearchFocus(NodeRef<html::Input>);

#[component]
fn NavBar() -> impl IntoView {
    let SearchFocus(search_ref) = use_context::<SearchFocus>().expect("App provides SearchFocus");
    view! {
        <nav class="flex flex-row flex-wrap justify-between items-center bg-stone-900 border-b-4 border-amber-800">
            <div class="flex flex-row">
                <A href=urls::HOME attr:class=NAVBAR_LINK_CLASSES>
                    "Bookstore"
                </A>
                <A href=urls::BOOKS attr:class=NAVBAR_LINK_CLASSES>
                    "All books"
                </A>
                <A href=urls::CATEGORIES attr:class=NAVBAR_LINK_CLASSES>
                    "Categories"
                </A>
            </div>
            <form method="get" action=urls::SEARCH class="flex flex-row m-2">
                <input
                    node_ref=search_ref
                    type="search"
                    name="q"
                    placeholder="Search title or author ( / )"
                    class="p-2 rounded-l-xl text-stone-900"
                />
                <input
                    type="submit"
                    value="Search"
                    class="p-2 rounded-r-xl bg-amber-700 hover:bg-amber-600 font-bold"
                />
            </form>
            <A href=urls::DASHBOARD attr:class=NAVBAR_LINK_CLASSES>
                "Store manager"
            </A>
        </nav>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let search_ref = NodeRef::<html::Input>::new();
    provide_context(SearchFocus(search_ref));
    // event listener for the search shortcut
    let _cleanup = use_event_listener(use_document(), keydown, move |evt| {
        let Some(input) = search_ref.get() else {
            return;
        };
        let typing = document()
            .active_element()
            .is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"));
        // </> - jump to search, unless the visitor is typing somewhere
        if evt.key() == "/" && !typing {
            evt.prevent_default();
            let _ = input.focus();
        // <esc> - leave the search box
        } else if evt.key() == "Escape" {
            input.set_value("");
            let _ = input.blur();
        }
    });

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/bookstore.css" />

        // sets the document title
        <Title text="Bookstore" />

        <div class="min-h-screen w-full flex flex-col bg-stone-100 text-stone-900">
            <Router>
                <NavBar />
                <main class="grow w-full p-4">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=StaticSegment("") view=HomePage />
                        <Route path=path!("books") view=BookList />
                        <Route path=path!("books/:id") view=BookDetail />
                        <Route path=path!("categories") view=CategoryPage />
                        <Route path=path!("categories/:category") view=CategoryPage />
                        <Route path=path!("search") view=SearchPage />
                        <Route path=path!("login") view=admin::login::LoginPage />
                        <admin::AdminRouter />
                    </Routes>
                </main>
            </Router>
        </div>
    }
}

/// Search box and the curated shelves
#[component]
fn HomePage() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center">
            <h1 class="p-6 text-5xl font-semibold">"Welcome to the Bookstore"</h1>
            <form method="get" action=urls::SEARCH class="flex flex-row w-full max-w-xl mb-6">
                <input
                    type="search"
                    name="q"
                    placeholder="Find a book by title or author"
                    class="grow p-3 rounded-l-xl border border-stone-400"
                />
                <input
                    type="submit"
                    value="Search"
                    class="p-3 rounded-r-xl bg-amber-700 text-amber-50 font-bold"
                />
            </form>
        </div>
        {Shelf::ALL.into_iter().map(|shelf| view! { <ShelfSection shelf /> }).collect_view()}
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="text-center p-10">
            <h1 class="text-4xl font-semibold">"Page not found."</h1>
            <A href=urls::HOME attr:class="underline text-amber-800">
                "Back to the shop"
            </A>
        </div>
    }
}
