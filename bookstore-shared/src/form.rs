//! The back-office book form: raw operator input and its validation into a payload

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{pricing::format_plain, BookPayload, BookView};

/// Every text input of the book form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BookField {
    Title,
    Author,
    Isbn,
    Year,
    Price,
    Category,
    OriginalPrice,
    Discount,
    CoverImage,
    Rating,
    ReviewsCount,
    Pages,
    Language,
    Publisher,
    Description,
}

impl BookField {
    pub const ALL: [BookField; 15] = [
        BookField::Title,
        BookField::Author,
        BookField::Isbn,
        BookField::Year,
        BookField::Price,
        BookField::Category,
        BookField::OriginalPrice,
        BookField::Discount,
        BookField::CoverImage,
        BookField::Rating,
        BookField::ReviewsCount,
        BookField::Pages,
        BookField::Language,
        BookField::Publisher,
        BookField::Description,
    ];

    /// Input name, identical to the wire field name
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Isbn => "isbn",
            Self::Year => "year",
            Self::Price => "price",
            Self::Category => "category",
            Self::OriginalPrice => "original_price",
            Self::Discount => "discount",
            Self::CoverImage => "cover_image",
            Self::Rating => "rating",
            Self::ReviewsCount => "reviews_count",
            Self::Pages => "pages",
            Self::Language => "language",
            Self::Publisher => "publisher",
            Self::Description => "description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Isbn => "ISBN",
            Self::Year => "Year",
            Self::Price => "Price",
            Self::Category => "Category",
            Self::OriginalPrice => "Original price",
            Self::Discount => "Discount (%)",
            Self::CoverImage => "Cover image URL",
            Self::Rating => "Rating",
            Self::ReviewsCount => "Number of reviews",
            Self::Pages => "Pages",
            Self::Language => "Language",
            Self::Publisher => "Publisher",
            Self::Description => "Description",
        }
    }

    /// The html input type to render
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Year
            | Self::Price
            | Self::OriginalPrice
            | Self::Discount
            | Self::Rating
            | Self::ReviewsCount
            | Self::Pages => "number",
            Self::CoverImage => "url",
            _ => "text",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Self::Title | Self::Author | Self::Isbn | Self::Year | Self::Price
        )
    }

    pub fn is_multiline(self) -> bool {
        self == Self::Description
    }
}

/// Raw contents of the book form
///
/// Everything is kept as typed so that half-entered numbers survive re-renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: String,
    pub price: String,
    pub category: String,
    pub original_price: String,
    pub discount: String,
    pub cover_image: String,
    pub rating: String,
    pub reviews_count: String,
    pub pages: String,
    pub language: String,
    pub publisher: String,
    pub description: String,
    pub is_new: bool,
}

/// Validation problems, one message per field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors(BTreeMap<BookField, String>);

impl FormErrors {
    pub fn get(&self, field: BookField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Forget the error for one field, e.g. once the operator edits it
    pub fn clear(&mut self, field: BookField) {
        self.0.remove(&field);
    }

    fn insert(&mut self, field: BookField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl core::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}: {message}", field.label())?;
            first = false;
        }
        Ok(())
    }
}
impl std::error::Error for FormErrors {}

/// Parse an optional number: empty input is `Ok(None)`, garbage is `Err(())`
fn parse_optional<T: std::str::FromStr>(raw: &str) -> Result<Option<T>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ())
}

impl BookForm {
    pub fn get(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Isbn => &self.isbn,
            BookField::Year => &self.year,
            BookField::Price => &self.price,
            BookField::Category => &self.category,
            BookField::OriginalPrice => &self.original_price,
            BookField::Discount => &self.discount,
            BookField::CoverImage => &self.cover_image,
            BookField::Rating => &self.rating,
            BookField::ReviewsCount => &self.reviews_count,
            BookField::Pages => &self.pages,
            BookField::Language => &self.language,
            BookField::Publisher => &self.publisher,
            BookField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: BookField, value: String) {
        let slot = match field {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Isbn => &mut self.isbn,
            BookField::Year => &mut self.year,
            BookField::Price => &mut self.price,
            BookField::Category => &mut self.category,
            BookField::OriginalPrice => &mut self.original_price,
            BookField::Discount => &mut self.discount,
            BookField::CoverImage => &mut self.cover_image,
            BookField::Rating => &mut self.rating,
            BookField::ReviewsCount => &mut self.reviews_count,
            BookField::Pages => &mut self.pages,
            BookField::Language => &mut self.language,
            BookField::Publisher => &mut self.publisher,
            BookField::Description => &mut self.description,
        };
        *slot = value;
    }

    /// Check the input and build the payload to send to the catalog
    ///
    /// All fields are checked, so the operator sees every problem at once.
    pub fn validate(&self) -> Result<BookPayload, FormErrors> {
        let mut errors = FormErrors::default();

        for field in [BookField::Title, BookField::Author, BookField::Isbn] {
            if self.get(field).trim().is_empty() {
                errors.insert(field, "This field is required.");
            }
        }

        let year = match parse_optional::<i32>(&self.year) {
            Ok(Some(year)) => year,
            _ => {
                errors.insert(BookField::Year, "Please enter a valid year.");
                0
            }
        };
        let price = match parse_optional::<f64>(&self.price) {
            Ok(Some(price)) if price.is_finite() && price >= 0.0 => price,
            _ => {
                errors.insert(BookField::Price, "Please enter a valid price.");
                0.0
            }
        };
        let original_price = match parse_optional::<f64>(&self.original_price) {
            Ok(None) => None,
            Ok(Some(p)) if p.is_finite() && p == 0.0 => None,
            Ok(Some(p)) if p.is_finite() && p > 0.0 => Some(p),
            _ => {
                errors.insert(
                    BookField::OriginalPrice,
                    "Please enter a valid original price.",
                );
                None
            }
        };
        let discount = match parse_optional::<i32>(&self.discount) {
            Ok(None) => 0,
            Ok(Some(d)) if (0..=100).contains(&d) => d,
            _ => {
                errors.insert(
                    BookField::Discount,
                    "Discount must be a whole number between 0 and 100.",
                );
                0
            }
        };
        let rating = match parse_optional::<f64>(&self.rating) {
            Ok(None) => 0.0,
            Ok(Some(r)) if (0.0..=5.0).contains(&r) => r,
            _ => {
                errors.insert(BookField::Rating, "Rating must be between 0 and 5.");
                0.0
            }
        };
        let reviews_count = match parse_optional::<i64>(&self.reviews_count) {
            Ok(None) => 0,
            Ok(Some(n)) if n >= 0 => n,
            _ => {
                errors.insert(
                    BookField::ReviewsCount,
                    "Please enter a valid number of reviews.",
                );
                0
            }
        };
        let pages = match parse_optional::<i32>(&self.pages) {
            Ok(None) => None,
            Ok(Some(n)) if n > 0 => Some(n),
            _ => {
                errors.insert(BookField::Pages, "Please enter a valid page count.");
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BookPayload {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            year,
            price,
            category: self.category.trim().to_string(),
            original_price,
            discount,
            cover_image: self.cover_image.trim().to_string(),
            rating,
            reviews_count,
            is_new: self.is_new,
            pages,
            language: self.language.trim().to_string(),
            publisher: self.publisher.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// Prefill the form for editing an existing book
impl From<&BookView> for BookForm {
    fn from(book: &BookView) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            year: book.year.to_string(),
            price: format_plain(book.price),
            category: book.category.clone().unwrap_or_default(),
            original_price: book.original_price.map(format_plain).unwrap_or_default(),
            discount: book.discount.to_string(),
            cover_image: book.cover_image.clone().unwrap_or_default(),
            rating: format_plain(book.rating),
            reviews_count: book.reviews_count.to_string(),
            pages: book.pages.map(|p| p.to_string()).unwrap_or_default(),
            language: book.language.clone(),
            publisher: book.publisher.clone(),
            description: book.description.clone().unwrap_or_default(),
            is_new: book.is_new,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn filled() -> BookForm {
        BookForm {
            title: "  The Little Prince ".to_string(),
            author: "Antoine de Saint-Exupéry".to_string(),
            isbn: "978-0156012195".to_string(),
            year: "1943".to_string(),
            price: "250".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_form_gets_defaults() {
        let payload = filled().validate().unwrap();
        assert_eq!(payload.title, "The Little Prince");
        assert_eq!(payload.year, 1943);
        assert_eq!(payload.price, 250.0);
        assert_eq!(payload.original_price, None);
        assert_eq!(payload.discount, 0);
        assert_eq!(payload.rating, 0.0);
        assert_eq!(payload.reviews_count, 0);
        assert_eq!(payload.pages, None);
        assert!(!payload.is_new);
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = BookForm::default().validate().unwrap_err();
        for field in BookField::ALL {
            assert_eq!(errors.get(field).is_some(), field.is_required(), "{field:?}");
        }
    }

    #[test]
    fn numbers_must_parse() {
        let mut form = filled();
        form.year = "nineteen".to_string();
        form.price = "12abc".to_string();
        form.pages = "-3".to_string();
        form.discount = "120".to_string();
        form.rating = "4.2".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.get(BookField::Year).is_some());
        assert!(errors.get(BookField::Price).is_some());
        assert!(errors.get(BookField::Pages).is_some());
        assert!(errors.get(BookField::Discount).is_some());
        assert!(errors.get(BookField::Rating).is_none());
    }

    #[test]
    fn clearing_an_error() {
        let mut errors = BookForm::default().validate().unwrap_err();
        errors.clear(BookField::Title);
        assert!(errors.get(BookField::Title).is_none());
        assert!(errors.get(BookField::Author).is_some());
        assert!(errors.to_string().starts_with("Author: "));
    }

    #[test]
    fn edit_prefill_survives_validation() {
        let view: BookView = crate::Book {
            id: 3,
            title: "Sapiens".to_string(),
            author: "Yuval Noah Harari".to_string(),
            isbn: "978-0062316097".to_string(),
            year: 2011,
            price: 400.0,
            category: "History".to_string(),
            original_price: Some(500.0),
            discount: 20,
            cover_image: "https://covers.example/3.jpg".to_string(),
            rating: 4.6,
            reviews_count: 120,
            is_new: true,
            pages: Some(498),
            language: "English".to_string(),
            publisher: "Harper".to_string(),
            description: "A brief history of humankind".to_string(),
            created_at: None,
            updated_at: None,
        }
        .into();
        let form = BookForm::from(&view);
        assert_eq!(form.get(BookField::OriginalPrice), "500");
        assert_eq!(form.get(BookField::Rating), "4.6");

        let payload = form.validate().unwrap();
        assert_eq!(payload.original_price, Some(500.0));
        assert_eq!(payload.discount, 20);
        assert_eq!(payload.pages, Some(498));
        assert!(payload.is_new);
        assert_eq!(payload.category, "History");
    }

    #[test]
    fn setters_match_getters() {
        let mut form = BookForm::default();
        for (idx, field) in BookField::ALL.into_iter().enumerate() {
            form.set(field, idx.to_string());
        }
        for (idx, field) in BookField::ALL.into_iter().enumerate() {
            assert_eq!(form.get(field), idx.to_string());
        }
    }
}
