//! The shop front: everything a visitor can see without logging in

// route paths
// /books
//      /:id
// /categories
//      /:category
// /search?q=keyword

use bookstore_shared::{BookView, Shelf};
use leptos::prelude::*;

pub mod books;
pub mod categories;
pub mod search;
pub mod shelves;

/// All books, or only those in `category` (ignoring case)
#[server]
pub async fn list_books(category: Option<String>) -> Result<Vec<BookView>, ServerFnError> {
    use crate::app::server::{catalog_failure, config};
    let config = config()?;
    let books = config
        .catalog
        .list_books(None)
        .await
        .map_err(catalog_failure)?;
    Ok(bookstore_shared::filter_by_category(
        books,
        category.as_deref(),
    ))
}

/// One book; `None` if the catalog does not know the id
#[server]
pub async fn get_book(id: i64) -> Result<Option<BookView>, ServerFnError> {
    use crate::app::server::{catalog_failure, config};
    let config = config()?;
    match config.catalog.get_book(id).await {
        Ok(book) => Ok(Some(book)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(catalog_failure(e)),
    }
}

#[server]
pub async fn list_categories() -> Result<Vec<String>, ServerFnError> {
    use crate::app::server::{catalog_failure, config};
    let config = config()?;
    config
        .catalog
        .list_categories()
        .await
        .map(bookstore_shared::normalize_categories)
        .map_err(catalog_failure)
}

#[server]
pub async fn search_books(keyword: String) -> Result<Vec<BookView>, ServerFnError> {
    use crate::app::server::{catalog_failure, config};
    let config = config()?;
    config
        .catalog
        .search_books(&keyword)
        .await
        .map_err(catalog_failure)
}

#[server]
pub async fn list_shelf(shelf: Shelf) -> Result<Vec<BookView>, ServerFnError> {
    use crate::app::server::{catalog_failure, config};
    let config = config()?;
    config
        .catalog
        .list_shelf(shelf)
        .await
        .map_err(catalog_failure)
}
