//! An in-process catalog to test the client against
//!
//! Mirrors the routes and quirks of the real catalog: list endpoints answer `null` when nothing
//! matches, a blank search is rejected, the category filter is an exact match.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use bookstore_shared::{Book, BookPayload};
use serde::Deserialize;
use tokio::sync::Mutex;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";

#[derive(Default)]
pub struct FakeState {
    pub books: Vec<Book>,
    next_id: i64,
    /// method of the last request to `/books/{id}` that changed a book
    pub last_update_method: Option<Method>,
}

pub type Shared = Arc<Mutex<FakeState>>;

pub fn book(id: i64, title: &str, author: &str, category: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        isbn: format!("978-{id:010}"),
        year: 2020,
        price: 300.0,
        category: category.to_string(),
        original_price: None,
        discount: 0,
        cover_image: String::new(),
        rating: 4.0,
        reviews_count: 10,
        is_new: false,
        pages: None,
        language: "Thai".to_string(),
        publisher: "Press".to_string(),
        description: String::new(),
        created_at: None,
        updated_at: None,
    }
}

fn seed() -> Vec<Book> {
    let mut dune = book(1, "Dune", "Frank Herbert", "Science Fiction");
    dune.original_price = Some(500.0);
    dune.discount = 20;
    let mut sapiens = book(2, "Sapiens", "Yuval Noah Harari", "History");
    sapiens.is_new = true;
    let mut foundation = book(3, "Foundation", "Isaac Asimov", "Science Fiction");
    foundation.rating = 4.8;
    foundation.original_price = Some(0.0);
    vec![dune, sapiens, foundation]
}

fn from_payload(id: i64, payload: BookPayload) -> Book {
    Book {
        id,
        title: payload.title,
        author: payload.author,
        isbn: payload.isbn,
        year: payload.year,
        price: payload.price,
        category: payload.category,
        original_price: payload.original_price,
        discount: payload.discount,
        cover_image: payload.cover_image,
        rating: payload.rating,
        reviews_count: payload.reviews_count,
        is_new: payload.is_new,
        pages: payload.pages,
        language: payload.language,
        publisher: payload.publisher,
        description: payload.description,
        created_at: None,
        updated_at: None,
    }
}

/// `None` serialises as `null`, which is what the catalog sends for an empty result
fn list(books: Vec<Book>) -> Json<Option<Vec<Book>>> {
    if books.is_empty() {
        Json(None)
    } else {
        Json(Some(books))
    }
}

#[derive(Deserialize)]
struct CategoryQuery {
    category: Option<String>,
}

async fn list_books(
    State(state): State<Shared>,
    Query(query): Query<CategoryQuery>,
) -> Json<Option<Vec<Book>>> {
    let state = state.lock().await;
    let books = state
        .books
        .iter()
        .filter(|b| query.category.as_ref().is_none_or(|c| &b.category == c))
        .cloned()
        .collect();
    list(books)
}

async fn create_book(
    State(state): State<Shared>,
    Json(payload): Json<BookPayload>,
) -> (StatusCode, Json<Book>) {
    let mut state = state.lock().await;
    state.next_id += 1;
    let book = from_payload(state.next_id, payload);
    state.books.push(book.clone());
    (StatusCode::CREATED, Json(book))
}

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

async fn search(
    State(state): State<Shared>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Option<Vec<Book>>>, StatusCode> {
    let keyword = match query.q {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return Err(StatusCode::BAD_REQUEST),
    };
    let state = state.lock().await;
    let books = state
        .books
        .iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&keyword) || b.author.to_lowercase().contains(&keyword)
        })
        .cloned()
        .collect();
    Ok(list(books))
}

async fn featured(State(state): State<Shared>) -> Json<Option<Vec<Book>>> {
    let state = state.lock().await;
    list(state.books.iter().filter(|b| b.rating >= 4.5).cloned().collect())
}

async fn new_books(State(state): State<Shared>) -> Json<Option<Vec<Book>>> {
    let state = state.lock().await;
    list(state.books.iter().filter(|b| b.is_new).cloned().collect())
}

async fn discounted(State(state): State<Shared>) -> Json<Option<Vec<Book>>> {
    let state = state.lock().await;
    list(state.books.iter().filter(|b| b.discount > 0).cloned().collect())
}

async fn get_book(State(state): State<Shared>, Path(id): Path<i64>) -> Result<Json<Book>, StatusCode> {
    let state = state.lock().await;
    state
        .books
        .iter()
        .find(|b| b.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_book(
    method: Method,
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<Book>, StatusCode> {
    let mut state = state.lock().await;
    state.last_update_method = Some(method);
    let slot = state
        .books
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = from_payload(id, payload);
    Ok(Json(slot.clone()))
}

async fn delete_book(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut state = state.lock().await;
    let before = state.books.len();
    state.books.retain(|b| b.id != id);
    if state.books.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn categories(State(state): State<Shared>) -> Json<Vec<String>> {
    let state = state.lock().await;
    let mut categories: Vec<String> = state.books.iter().map(|b| b.category.clone()).collect();
    categories.sort();
    categories.dedup();
    Json(categories)
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

async fn login(Json(request): Json<LoginRequest>) -> (StatusCode, String) {
    if request.username == USERNAME && request.password == PASSWORD {
        (StatusCode::OK, "token-for-admin".to_string())
    } else {
        (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
    }
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Serve the fake catalog on a free local port
///
/// Returns the base url to hand to the client and the state for inspection.
pub async fn spawn() -> (url::Url, Shared) {
    let books = seed();
    let state = Arc::new(Mutex::new(FakeState {
        next_id: books.len() as i64,
        books,
        last_update_method: None,
    }));
    let api = Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/search", get(search))
        .route("/books/featured", get(featured))
        .route("/books/new", get(new_books))
        .route("/books/discounted", get(discounted))
        .route(
            "/books/{id}",
            get(get_book)
                .post(update_book)
                .put(update_book)
                .delete(delete_book),
        )
        .route("/categories", get(categories))
        .route("/login", post(login))
        .route("/broken/books", get(broken))
        .with_state(state.clone());
    let app = Router::new().nest("/api/v1", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("can bind to a free port");
    let addr = listener.local_addr().expect("bound listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake catalog runs");
    });
    let base_url = url::Url::parse(&format!("http://{addr}/api/v1")).expect("valid url");
    (base_url, state)
}
