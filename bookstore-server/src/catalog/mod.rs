//! Communicate with the catalog API
//!
//! The catalog speaks the wire shape ([`Book`], snake_case). Everything handed out of this module
//! is already in display shape ([`BookView`]).

use std::time::Duration;

use bookstore_shared::{urls, Book, BookPayload, BookView, Shelf};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

// include tests
#[cfg(any(test, feature = "fake-catalog"))]
pub mod fake;
#[cfg(test)]
mod test;

/// Which HTTP method the catalog expects for updating a book
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMethod {
    #[default]
    Post,
    Put,
}
impl From<UpdateMethod> for Method {
    fn from(value: UpdateMethod) -> Self {
        match value {
            UpdateMethod::Post => Method::POST,
            UpdateMethod::Put => Method::PUT,
        }
    }
}

/// The catalog operation a request belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListBooks,
    GetBook,
    ListCategories,
    Search,
    Shelf(Shelf),
    Login,
    Create,
    Update,
    Delete,
}
impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::ListBooks => write!(f, "Failed to fetch books"),
            Self::GetBook => write!(f, "Failed to fetch book"),
            Self::ListCategories => write!(f, "Failed to fetch categories"),
            Self::Search => write!(f, "Failed to search books"),
            Self::Shelf(shelf) => write!(f, "Failed to fetch {}", shelf.noun()),
            Self::Login => write!(f, "Failed to log in"),
            Self::Create => write!(f, "Failed to add book"),
            Self::Update => write!(f, "Failed to update book"),
            Self::Delete => write!(f, "Failed to delete book"),
        }
    }
}

#[derive(Debug)]
pub enum CatalogError {
    /// Reqwest had problems making the request itself
    Reqwest(Operation, reqwest::Error),
    /// The catalog answered, but not with a success status
    BadStatusCode(Operation, StatusCode),
    /// The response body was not what we expected
    Decode(Operation, reqwest::Error),
}
impl CatalogError {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Reqwest(op, _) | Self::BadStatusCode(op, _) | Self::Decode(op, _) => *op,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::BadStatusCode(_, status) => Some(*status),
            _ => None,
        }
    }

    /// The catalog does not know the requested book
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
impl core::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Reqwest(op, e) => {
                write!(f, "{op}: unable to reach the catalog: {e}")
            }
            Self::BadStatusCode(Operation::Login, code) if code.is_client_error() => {
                write!(f, "Invalid username or password")
            }
            Self::BadStatusCode(op, code) => {
                write!(f, "{op} (catalog answered {code})")
            }
            Self::Decode(op, e) => {
                write!(f, "{op}: unexpected response from the catalog: {e}")
            }
        }
    }
}
impl core::error::Error for CatalogError {}

/// Typed client for the catalog API
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    /// without trailing slash
    base_url: String,
    update_method: UpdateMethod,
}

impl CatalogClient {
    pub fn new(
        base_url: &url::Url,
        timeout: Duration,
        update_method: UpdateMethod,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            update_method,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send the request and make sure the catalog answered with a success status
    async fn send(
        &self,
        op: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, CatalogError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("{op}: request to the catalog failed: {e}");
            CatalogError::Reqwest(op, e)
        })?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            tracing::warn!("{op}: catalog answered {status} for {}", response.url());
            Err(CatalogError::BadStatusCode(op, status))
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        op: Operation,
        url: String,
    ) -> Result<T, CatalogError> {
        tracing::debug!("GET {url}");
        self.send(op, self.http.get(url))
            .await?
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(op, e))
    }

    /// List endpoints answer `null` instead of `[]` when nothing matches
    async fn get_books(&self, op: Operation, url: String) -> Result<Vec<BookView>, CatalogError> {
        Ok(self
            .get_json::<Option<Vec<Book>>>(op, url)
            .await?
            .unwrap_or_default()
            .into_iter()
            .map(BookView::from)
            .collect())
    }

    /// All books, or only those the catalog files under `category`
    pub async fn list_books(&self, category: Option<&str>) -> Result<Vec<BookView>, CatalogError> {
        let url = match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(category) => format!(
                "{}?category={}",
                self.url(urls::API_BOOKS),
                urlencoding::encode(category)
            ),
            None => self.url(urls::API_BOOKS),
        };
        self.get_books(Operation::ListBooks, url).await
    }

    pub async fn get_book(&self, id: i64) -> Result<BookView, CatalogError> {
        self.get_json::<Book>(Operation::GetBook, self.url(&urls::api_book(id)))
            .await
            .map(BookView::from)
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self
            .get_json::<Option<Vec<String>>>(
                Operation::ListCategories,
                self.url(urls::API_CATEGORIES),
            )
            .await?
            .unwrap_or_default())
    }

    /// Search title and author. A blank keyword matches nothing and sends no request.
    pub async fn search_books(&self, keyword: &str) -> Result<Vec<BookView>, CatalogError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!(
            "{}?q={}",
            self.url(urls::API_SEARCH),
            urlencoding::encode(keyword)
        );
        self.get_books(Operation::Search, url).await
    }

    pub async fn list_shelf(&self, shelf: Shelf) -> Result<Vec<BookView>, CatalogError> {
        self.get_books(Operation::Shelf(shelf), self.url(shelf.api_path()))
            .await
    }

    /// Ask the catalog whether the credentials are valid
    ///
    /// Returns the raw reply body on success; its content is opaque to us.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, CatalogError> {
        #[derive(serde::Serialize)]
        struct LoginRequest<'a> {
            username: &'a str,
            password: &'a str,
        }
        let op = Operation::Login;
        let url = self.url(urls::API_LOGIN);
        tracing::debug!("POST {url} for {username}");
        self.send(
            op,
            self.http.post(url).json(&LoginRequest { username, password }),
        )
        .await?
        .text()
        .await
        .map_err(|e| CatalogError::Decode(op, e))
    }

    pub async fn create_book(&self, payload: &BookPayload) -> Result<BookView, CatalogError> {
        let op = Operation::Create;
        let url = self.url(urls::API_BOOKS);
        tracing::debug!("POST {url}");
        self.send(op, self.http.post(url).json(payload))
            .await?
            .json::<Book>()
            .await
            .map(BookView::from)
            .map_err(|e| CatalogError::Decode(op, e))
    }

    /// Replace all fields of book `id`
    pub async fn update_book(
        &self,
        id: i64,
        payload: &BookPayload,
    ) -> Result<BookView, CatalogError> {
        let op = Operation::Update;
        let url = self.url(&urls::api_book(id));
        let method: Method = self.update_method.into();
        tracing::debug!("{method} {url}");
        let mut updated = self
            .send(op, self.http.request(method, url).json(payload))
            .await?
            .json::<Book>()
            .await
            .map_err(|e| CatalogError::Decode(op, e))?;
        // the catalog echoes the payload; make sure the id is the one we updated
        updated.id = id;
        Ok(updated.into())
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), CatalogError> {
        let url = self.url(&urls::api_book(id));
        tracing::debug!("DELETE {url}");
        self.send(Operation::Delete, self.http.delete(url))
            .await
            .map(|_| ())
    }
}
