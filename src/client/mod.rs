//! Client for the remote scheduler REST API.

pub mod auth;
pub mod collaboration;
pub mod directory;
pub mod error;
pub mod scheduler;

use crate::config::Config;
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

pub use error::ApiError;
pub use scheduler::SchedulerApi;

/// Pages followed for a single listing before giving up.
const MAX_PAGES: usize = 200;

/// Remote list endpoints answer either with a bare array or a page envelope
/// linking to the next page.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Paged {
        results: Vec<T>,
        #[serde(default)]
        next: Option<String>,
    },
    Plain(Vec<T>),
}

/// Handle on the remote API. Clones share the HTTP connection pool and the
/// bearer token slot; a 401 from any clone clears the token for all of them.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()?;
        Ok(Self::from_parts(http, &config.api_base_url))
    }

    pub fn from_parts(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// A client for one signed-in user; the connection pool is shared.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn clear_token(&self) {
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_url(method, &self.url(path))
    }

    fn request_url(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let resp = builder.send().await?;
        let status = resp.status();
        debug!(status = status.as_u16(), url = %resp.url(), "Remote API responded");

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &body);
        if err == ApiError::Unauthorized {
            warn!("Remote API rejected the access token, clearing it");
            self.clear_token();
        }
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let resp = self.dispatch(builder).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Every item of a listing, following `next` links page by page. Links
    /// leaving the API base URL are not followed, so the token stays there.
    async fn collect_pages<T: DeserializeOwned>(&self, first: RequestBuilder) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut builder = first;

        for _ in 0..MAX_PAGES {
            let next = match self.fetch::<ListBody<T>>(builder).await? {
                ListBody::Plain(page) => {
                    items.extend(page);
                    return Ok(items);
                }
                ListBody::Paged { results, next } => {
                    items.extend(results);
                    next
                }
            };

            match next {
                None => return Ok(items),
                Some(url) if url.starts_with(self.base_url.as_ref()) => {
                    builder = self.request_url(Method::GET, &url);
                }
                Some(url) => {
                    warn!(%url, fetched = items.len(), "Next page is outside the API, listing truncated");
                    return Ok(items);
                }
            }
        }

        warn!(max_pages = MAX_PAGES, fetched = items.len(), "Too many pages, listing truncated");
        Ok(items)
    }

    pub(crate) async fn list<T, Q>(&self, path: &str, query: &Q) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.collect_pages(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn list_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        self.collect_pages(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch(self.request(Method::GET, path)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(self.request(Method::POST, path).json(body)).await
    }

    /// POST whose response body is not needed.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.dispatch(self.request(Method::POST, path).json(body))
            .await
            .map(|_| ())
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(self.request(Method::PATCH, path).json(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch(self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }
}
