//! # REST client
//!
//! [`ApiClient`] wraps a `reqwest::Client`, the backend base URL and the
//! optional bearer token. It is cheap to clone: the UI hands a fresh copy to
//! every spawned request.
//!
//! The endpoint methods live in [`crate::endpoints`], grouped by backend
//! router; this module only holds the plumbing they share.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("signed_in", &self.token.is_some())
            .finish()
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.token == other.token
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    /// Copy of this client that authenticates as `token`.
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and return the raw body of a 2xx response.
    async fn execute(&self, builder: RequestBuilder, label: &str) -> Result<String, ApiError> {
        tracing::debug!("{}", label);
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("{} failed: {}", label, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), &body);
            tracing::warn!("{} returned {}: {}", label, status.as_u16(), err);
            return Err(err);
        }
        Ok(body)
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        label: &str,
    ) -> Result<T, ApiError> {
        let body = self.execute(builder, label).await?;
        decode(&body)
    }

    /// Like [`send`](Self::send) but discards the body.
    pub(crate) async fn send_empty(
        &self,
        builder: RequestBuilder,
        label: &str,
    ) -> Result<(), ApiError> {
        self.execute(builder, label).await.map(|_| ())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path), &format!("GET {}", path))
            .await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(
            self.request(Method::POST, path).json(body),
            &format!("POST {}", path),
        )
        .await
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(
            self.request(Method::PATCH, path).json(body),
            &format!("PATCH {}", path),
        )
        .await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(
            self.request(Method::PUT, path).json(body),
            &format!("PUT {}", path),
        )
        .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send_empty(
            self.request(Method::DELETE, path),
            &format!("DELETE {}", path),
        )
        .await
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    // Some endpoints answer 2xx with an empty body; treat it as JSON null.
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/auth/me"), "http://localhost:8000/auth/me");
        assert_eq!(client.url("courses/"), "http://localhost:8000/courses/");
    }

    #[test]
    fn test_bearer_header_only_with_token() {
        let anon = ApiClient::new("http://api.test");
        let req = anon.request(Method::GET, "/courses/").build().unwrap();
        assert!(req.headers().get("authorization").is_none());

        let authed = anon.with_token(Some("abc123".into()));
        let req = authed.request(Method::GET, "/courses/").build().unwrap();
        assert_eq!(req.headers()["authorization"], "Bearer abc123");
        assert_eq!(authed.token(), Some("abc123"));
        assert_ne!(anon, authed);
    }

    #[test]
    fn test_decode() {
        let unit: () = decode("").unwrap();
        assert_eq!(unit, ());
        let user: User =
            decode(r#"{"id":1,"email":"a@b.c","full_name":"A B","role":"admin"}"#).unwrap();
        assert_eq!(user.id, 1);
        let err = decode::<User>("{").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
