//! Types and functions shared by App and Server

pub mod form;
pub mod pricing;
pub mod session;
pub mod urls;

use serde::{Deserialize, Deserializer, Serialize};

use pricing::PriceTag;

/// Prefix for every amount shown in the shop
pub const CURRENCY_SYMBOL: &str = "฿";

/// The catalog answers `null` for some string columns; treat that as the default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A book exactly as the catalog API sends it (wire shape, snake_case)
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub isbn: String,
    #[serde(default)]
    pub year: i32,
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// The catalog coalesces a missing original price to 0 in some queries
    #[serde(default)]
    pub original_price: Option<f64>,
    /// Percent, 0 when the book is not discounted
    #[serde(default)]
    pub discount: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover_image: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: i64,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub pages: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Everything needed to create or update a book (wire shape, without id and timestamps)
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    pub price: f64,
    pub category: String,
    pub original_price: Option<f64>,
    pub discount: i32,
    pub cover_image: String,
    pub rating: f64,
    pub reviews_count: i64,
    pub is_new: bool,
    pub pages: Option<i32>,
    pub language: String,
    pub publisher: String,
    pub description: String,
}

/// A book as the pages render it (display shape, camelCase)
///
/// Coalesced zeros and empty strings from the catalog are turned back into `None` here, and the
/// price tag is derived once so that every page shows the same price.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount: i32,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub rating: f64,
    pub reviews_count: i64,
    pub is_new: bool,
    pub pages: Option<i32>,
    pub language: String,
    pub publisher: String,
    pub description: Option<String>,
    pub price_tag: PriceTag,
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        let original_price = book.original_price.filter(|p| *p > 0.0);
        let price_tag = PriceTag::derive(book.price, original_price, book.discount);
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            year: book.year,
            price: book.price,
            original_price,
            discount: book.discount,
            category: non_blank(book.category),
            cover_image: non_blank(book.cover_image),
            rating: book.rating,
            reviews_count: book.reviews_count,
            is_new: book.is_new,
            pages: book.pages.filter(|p| *p > 0),
            language: book.language,
            publisher: book.publisher,
            description: non_blank(book.description),
            price_tag,
        }
    }
}

impl BookView {
    /// Text of the sale badge, e.g. `-20%`
    pub fn sale_badge(&self) -> Option<String> {
        self.price_tag.sale_badge()
    }

    pub fn detail_href(&self) -> String {
        urls::book_detail(self.id)
    }
}

/// The curated subsets the catalog offers next to the full list
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum Shelf {
    Featured,
    New,
    Discounted,
}
impl Shelf {
    pub const ALL: [Shelf; 3] = [Shelf::Featured, Shelf::New, Shelf::Discounted];

    pub fn api_path(self) -> &'static str {
        match self {
            Self::Featured => urls::API_FEATURED,
            Self::New => urls::API_NEW,
            Self::Discounted => urls::API_DISCOUNTED,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::Featured => "Featured books",
            Self::New => "New arrivals",
            Self::Discounted => "On sale",
        }
    }

    /// Used in the error message when the shelf cannot be loaded
    pub fn noun(self) -> &'static str {
        match self {
            Self::Featured => "featured books",
            Self::New => "new books",
            Self::Discounted => "discounted books",
        }
    }
}

/// Does a book category match the requested one? Case is ignored.
pub fn matches_category(book_category: Option<&str>, wanted: &str) -> bool {
    let wanted = wanted.trim().to_lowercase();
    book_category.is_some_and(|c| c.trim().to_lowercase() == wanted)
}

/// Keep only books in `category`, or all of them when no category is selected
pub fn filter_by_category(books: Vec<BookView>, category: Option<&str>) -> Vec<BookView> {
    match category {
        Some(wanted) if !wanted.trim().is_empty() => books
            .into_iter()
            .filter(|b| matches_category(b.category.as_deref(), wanted))
            .collect(),
        _ => books,
    }
}

/// Drop blank category names and duplicates (ignoring case), keeping the first spelling seen
pub fn normalize_categories(categories: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    categories
        .into_iter()
        .filter(|c| !c.trim().is_empty())
        .filter(|c| seen.insert(c.trim().to_lowercase()))
        .collect()
}

/// Put an updated book in place of the entry with the same id
///
/// Returns false if no entry had that id; the list is unchanged in that case.
pub fn replace_book(books: &mut [BookView], updated: BookView) -> bool {
    match books.iter_mut().find(|b| b.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Remove the book with `id` from a local list
pub fn remove_book(books: &mut Vec<BookView>, id: i64) {
    books.retain(|b| b.id != id);
}

#[cfg(test)]
mod test {
    use super::*;

    pub(crate) fn book(id: i64, category: &str) -> Book {
        Book {
            id,
            title: format!("Book {id}"),
            author: "Someone".to_string(),
            isbn: "978-0000000000".to_string(),
            year: 2020,
            price: 300.0,
            category: category.to_string(),
            original_price: None,
            discount: 0,
            cover_image: String::new(),
            rating: 4.0,
            reviews_count: 12,
            is_new: false,
            pages: Some(0),
            language: "Thai".to_string(),
            publisher: "Press".to_string(),
            description: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn wire_book_with_nulls_decodes() {
        let json = r#"{
            "id": 7, "title": "T", "author": "A", "isbn": null, "year": 2001, "price": 120.5,
            "category": null, "original_price": null, "discount": 0, "cover_image": null,
            "rating": 4.5, "reviews_count": 3, "is_new": true, "pages": null,
            "language": null, "publisher": null, "description": null,
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.isbn, "");
        assert_eq!(book.original_price, None);
        assert_eq!(book.pages, None);
        assert!(book.is_new);
        assert_eq!(book.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn display_shape_uses_camel_case() {
        let mut wire = book(1, "Fiction");
        wire.cover_image = "https://covers.example/1.jpg".to_string();
        wire.original_price = Some(400.0);
        wire.discount = 25;
        wire.is_new = true;
        let json = serde_json::to_value(BookView::from(wire)).unwrap();
        assert_eq!(json["coverImage"], "https://covers.example/1.jpg");
        assert_eq!(json["originalPrice"], 400.0);
        assert_eq!(json["reviewsCount"], 12);
        assert_eq!(json["isNew"], true);
        assert!(json.get("cover_image").is_none());
    }

    #[test]
    fn coalesced_zeros_become_absent() {
        let mut wire = book(1, "");
        wire.original_price = Some(0.0);
        wire.discount = 10;
        let view = BookView::from(wire);
        assert_eq!(view.original_price, None);
        assert_eq!(view.pages, None);
        assert_eq!(view.category, None);
        assert_eq!(view.cover_image, None);
        assert_eq!(view.price_tag, PriceTag::Regular { price: 300.0 });
        assert_eq!(view.sale_badge(), None);
    }

    #[test]
    fn category_filter_ignores_case() {
        let books: Vec<BookView> = vec![
            book(1, "Fiction").into(),
            book(2, "fiction").into(),
            book(3, "History").into(),
            book(4, "").into(),
            book(5, "Science Fiction").into(),
        ];
        let filtered = filter_by_category(books.clone(), Some("Fiction"));
        let ids: Vec<i64> = filtered.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(filtered
            .iter()
            .all(|b| b.category.as_deref().unwrap().eq_ignore_ascii_case("fiction")));

        assert_eq!(filter_by_category(books.clone(), None).len(), 5);
        assert_eq!(filter_by_category(books, Some("  ")).len(), 5);
    }

    #[test]
    fn categories_are_deduplicated() {
        let categories = vec![
            "Fiction".to_string(),
            "".to_string(),
            "History".to_string(),
            "fiction".to_string(),
            " ".to_string(),
        ];
        assert_eq!(
            normalize_categories(categories),
            vec!["Fiction".to_string(), "History".to_string()]
        );
    }

    #[test]
    fn local_list_updates() {
        let mut books: Vec<BookView> = vec![book(1, "A").into(), book(2, "B").into()];
        let mut changed = book(2, "B");
        changed.title = "Renamed".to_string();
        assert!(replace_book(&mut books, changed.into()));
        assert_eq!(books[1].title, "Renamed");
        assert!(!replace_book(&mut books, book(9, "C").into()));
        assert_eq!(books.len(), 2);

        remove_book(&mut books, 1);
        assert_eq!(books.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn shelves_point_at_their_endpoints() {
        assert_eq!(Shelf::Featured.api_path(), "/books/featured");
        assert_eq!(Shelf::New.api_path(), "/books/new");
        assert_eq!(Shelf::Discounted.api_path(), "/books/discounted");
    }
}
