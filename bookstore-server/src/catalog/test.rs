use std::time::Duration;

use bookstore_shared::{pricing::PriceTag, BookPayload, Shelf};
use reqwest::{Method, StatusCode};

use super::{fake, CatalogClient, CatalogError, Operation, UpdateMethod};

fn client(base_url: &url::Url, update_method: UpdateMethod) -> CatalogClient {
    CatalogClient::new(base_url, Duration::from_secs(5), update_method).unwrap()
}

fn payload(title: &str) -> BookPayload {
    BookPayload {
        title: title.to_string(),
        author: "Ursula K. Le Guin".to_string(),
        isbn: "978-0441478125".to_string(),
        year: 1969,
        price: 350.0,
        category: "Science Fiction".to_string(),
        original_price: Some(400.0),
        discount: 10,
        cover_image: String::new(),
        rating: 4.6,
        reviews_count: 0,
        is_new: true,
        pages: Some(304),
        language: "English".to_string(),
        publisher: "Ace".to_string(),
        description: "Winter".to_string(),
    }
}

#[tokio::test]
async fn lists_all_books_in_display_shape() {
    let (base, _) = fake::spawn().await;
    let books = client(&base, UpdateMethod::Post).list_books(None).await.unwrap();
    assert_eq!(books.len(), 3);
    let dune = &books[0];
    assert_eq!(dune.title, "Dune");
    assert!(dune.price_tag.is_sale());
    assert_eq!(dune.price_tag.displayed(), "400.00");
    // the catalog coalesces a missing original price to 0
    let foundation = &books[2];
    assert_eq!(foundation.original_price, None);
    assert_eq!(foundation.price_tag, PriceTag::Regular { price: 300.0 });
}

#[tokio::test]
async fn category_is_encoded() {
    let (base, _) = fake::spawn().await;
    let books = client(&base, UpdateMethod::Post)
        .list_books(Some("Science Fiction"))
        .await
        .unwrap();
    let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn unknown_category_is_empty_not_an_error() {
    let (base, _) = fake::spawn().await;
    let books = client(&base, UpdateMethod::Post)
        .list_books(Some("Poetry"))
        .await
        .unwrap();
    assert!(books.is_empty());
}

#[tokio::test]
async fn search_matches_title_and_author() {
    let (base, _) = fake::spawn().await;
    let client = client(&base, UpdateMethod::Post);
    let by_title = client.search_books("dune").await.unwrap();
    assert_eq!(by_title.len(), 1);
    let by_author = client.search_books("  asimov ").await.unwrap();
    assert_eq!(by_author[0].title, "Foundation");
    // the catalog answers null here
    assert!(client.search_books("tolkien").await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_search_sends_nothing() {
    // nothing listens here; a request would fail
    let base = url::Url::parse("http://127.0.0.1:9/api/v1").unwrap();
    let client = client(&base, UpdateMethod::Post);
    assert!(client.search_books("").await.unwrap().is_empty());
    assert!(client.search_books("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn shelves() {
    let (base, _) = fake::spawn().await;
    let client = client(&base, UpdateMethod::Post);
    let featured = client.list_shelf(Shelf::Featured).await.unwrap();
    assert_eq!(featured.iter().map(|b| b.id).collect::<Vec<_>>(), vec![3]);
    let new = client.list_shelf(Shelf::New).await.unwrap();
    assert_eq!(new[0].title, "Sapiens");
    let discounted = client.list_shelf(Shelf::Discounted).await.unwrap();
    assert_eq!(discounted[0].sale_badge().as_deref(), Some("-20%"));
}

#[tokio::test]
async fn single_book_and_missing_book() {
    let (base, _) = fake::spawn().await;
    let client = client(&base, UpdateMethod::Post);
    assert_eq!(client.get_book(2).await.unwrap().author, "Yuval Noah Harari");
    let err = client.get_book(99).await.unwrap_err();
    assert_eq!(err.operation(), Operation::GetBook);
    assert!(err.is_not_found());
    assert!(err.to_string().starts_with("Failed to fetch book"));
}

#[tokio::test]
async fn categories_come_from_the_catalog() {
    let (base, _) = fake::spawn().await;
    let categories = client(&base, UpdateMethod::Post)
        .list_categories()
        .await
        .unwrap();
    assert_eq!(categories, vec!["History", "Science Fiction"]);
}

#[tokio::test]
async fn login_checks_credentials() {
    let (base, _) = fake::spawn().await;
    let client = client(&base, UpdateMethod::Post);
    let reply = client.login(fake::USERNAME, fake::PASSWORD).await.unwrap();
    assert_eq!(reply, "token-for-admin");

    let err = client.login(fake::USERNAME, "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.to_string(), "Invalid username or password");
}

#[tokio::test]
async fn create_then_list() {
    let (base, _) = fake::spawn().await;
    let client = client(&base, UpdateMethod::Post);
    let created = client
        .create_book(&payload("The Left Hand of Darkness"))
        .await
        .unwrap();
    assert_eq!(created.id, 4);
    assert_eq!(created.price_tag.displayed(), "360.00");
    let books = client.list_books(None).await.unwrap();
    assert!(books.iter().any(|b| b.title == "The Left Hand of Darkness"));
}

#[tokio::test]
async fn update_uses_configured_method() {
    let (base, state) = fake::spawn().await;
    let updated = client(&base, UpdateMethod::Post)
        .update_book(1, &payload("Dune Messiah"))
        .await
        .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(state.lock().await.last_update_method, Some(Method::POST));

    client(&base, UpdateMethod::Put)
        .update_book(1, &payload("Children of Dune"))
        .await
        .unwrap();
    assert_eq!(state.lock().await.last_update_method, Some(Method::PUT));
    assert_eq!(state.lock().await.books[0].title, "Children of Dune");
}

#[tokio::test]
async fn update_of_missing_book_fails() {
    let (base, _) = fake::spawn().await;
    let err = client(&base, UpdateMethod::Post)
        .update_book(42, &payload("Nobody"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::BadStatusCode(Operation::Update, _)));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn deleted_book_is_gone_from_next_list() {
    let (base, _) = fake::spawn().await;
    let client = client(&base, UpdateMethod::Post);
    client.delete_book(2).await.unwrap();
    let books = client.list_books(None).await.unwrap();
    assert!(books.iter().all(|b| b.id != 2));
    assert_eq!(books.len(), 2);

    let err = client.delete_book(2).await.unwrap_err();
    assert_eq!(err.operation(), Operation::Delete);
}

#[tokio::test]
async fn server_errors_carry_the_operation() {
    let (base, _) = fake::spawn().await;
    let broken = base.join("v1/broken").unwrap();
    let err = client(&broken, UpdateMethod::Post)
        .list_books(None)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(err.to_string().starts_with("Failed to fetch books"));
}

#[tokio::test]
async fn unreachable_catalog() {
    let base = url::Url::parse("http://127.0.0.1:9/api/v1").unwrap();
    let err = client(&base, UpdateMethod::Post)
        .list_shelf(Shelf::New)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Reqwest(Operation::Shelf(Shelf::New), _)));
    assert!(err.to_string().starts_with("Failed to fetch new books"));
}
