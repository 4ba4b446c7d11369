//! URLs shared between front- and backend
//!
//! for consistency, all paths in this module always start with a /

/// Shop front
pub const HOME: &str = "/";
pub const BOOKS: &str = "/books";
pub const CATEGORIES: &str = "/categories";
pub const SEARCH: &str = "/search";

/// Back office
pub const LOGIN: &str = "/login";
pub const DASHBOARD: &str = "/store-manager/dashboard";
pub const ADD_BOOK: &str = "/store-manager/add-book";
pub const EDIT_BOOK: &str = "/store-manager/edit-book";
pub const DELETE_BOOK: &str = "/store-manager/delete-book";

/// Catalog API endpoints, relative to the configured base url
pub const API_BOOKS: &str = "/books";
pub const API_SEARCH: &str = "/books/search";
pub const API_FEATURED: &str = "/books/featured";
pub const API_NEW: &str = "/books/new";
pub const API_DISCOUNTED: &str = "/books/discounted";
pub const API_CATEGORIES: &str = "/categories";
pub const API_LOGIN: &str = "/login";

pub fn book_detail(id: i64) -> String {
    format!("{BOOKS}/{id}")
}

pub fn category(name: &str) -> String {
    format!("{CATEGORIES}/{}", urlencoding::encode(name))
}

pub fn search(keyword: &str) -> String {
    format!("{SEARCH}?q={}", urlencoding::encode(keyword))
}

pub fn edit_book(id: i64) -> String {
    format!("{EDIT_BOOK}/{id}")
}

/// Catalog path of a single book
pub fn api_book(id: i64) -> String {
    format!("{API_BOOKS}/{id}")
}
