//! Secure request client
//!
//! Single chokepoint for every call to the auth and resource APIs. Each
//! request is credentialed (the shared cookie jar carries the session
//! cookie), state-changing verbs get the CSRF header, and every call is
//! bounded by a deadline and the client's cancellation token.

use crate::config::ClientConfig;
use crate::csrf::{self, CsrfCookies};
use crate::{ClientError, ClientResult};
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A request before policy is applied. `path` is relative to the API root.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

impl OutboundRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a JSON body
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client enforcing the transport security policy
#[derive(Debug, Clone)]
pub struct SecureHttpClient {
    client: Client,
    api_root: Url,
    csrf: CsrfCookies,
    csrf_header: HeaderName,
    cancel: CancellationToken,
}

impl SecureHttpClient {
    /// Create a new client with its own cookie jar
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Self::with_jar(config, Arc::new(Jar::default()))
    }

    /// Create a client on an existing cookie jar
    pub fn with_jar(config: &ClientConfig, jar: Arc<Jar>) -> ClientResult<Self> {
        config.validate()?;

        let mut api_root = Url::parse(&config.api_root)
            .map_err(|e| ClientError::Config(format!("invalid api root: {}", e)))?;
        if !api_root.path().ends_with('/') {
            let path = format!("{}/", api_root.path());
            api_root.set_path(&path);
        }

        let csrf_header = HeaderName::from_bytes(config.csrf_header_name.as_bytes())
            .map_err(|e| ClientError::Config(format!("invalid csrf header name: {}", e)))?;

        let client = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            csrf: CsrfCookies::new(jar, config.csrf_cookie_name.clone(), api_root.clone()),
            api_root,
            csrf_header,
            cancel: CancellationToken::new(),
        })
    }

    /// API root, always ending in `/`
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// Resolve a path against the API root
    pub fn url_for(&self, path: &str) -> ClientResult<Url> {
        if path.contains("://") || path.starts_with("//") {
            return Err(ClientError::Config(format!(
                "request path must be relative to the api root: {}",
                path
            )));
        }
        let relative = path.trim_start_matches('/');
        let route = relative.split(['?', '#']).next().unwrap_or_default();
        if route.split('/').any(|segment| segment == "..") {
            return Err(ClientError::Config(format!(
                "request path escapes the api root: {}",
                path
            )));
        }
        self.api_root
            .join(relative)
            .map_err(|e| ClientError::Config(format!("invalid request path {:?}: {}", path, e)))
    }

    /// Current CSRF token as the jar holds it
    pub fn csrf_token(&self) -> Option<String> {
        self.csrf.token()
    }

    /// Best-effort removal of the local CSRF cookie copy
    pub fn clear_csrf_cookie(&self) {
        self.csrf.clear();
    }

    /// Token that aborts every in-flight and future request of this client
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel everything. Requests issued afterwards fail with `Cancelled`.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Apply the security policy and send.
    ///
    /// Error statuses become `ClientError::Api`; the raw response is only
    /// returned on success.
    pub async fn send(&self, request: OutboundRequest) -> ClientResult<reqwest::Response> {
        let OutboundRequest {
            method,
            path,
            body,
            mut headers,
        } = request;

        let url = self.url_for(&path)?;

        if csrf::is_state_changing(&method) {
            match self.csrf.token_for(&url) {
                Some(token) => {
                    let value = HeaderValue::from_str(&token).map_err(|_| {
                        ClientError::Config(format!(
                            "cookie {} is not a valid header value",
                            self.csrf.cookie_name()
                        ))
                    })?;
                    headers.insert(self.csrf_header.clone(), value);
                }
                None => {
                    // The server is expected to reject it; not blocked here.
                    tracing::warn!(
                        method = %method,
                        path = %path,
                        "CSRF token is missing for a state-changing request"
                    );
                }
            }
        } else {
            headers.remove(&self.csrf_header);
        }

        let mut builder = self.client.request(method.clone(), url).headers(headers);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %method, path = %path, "Sending request");

        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(ClientError::Cancelled),
            result = builder.send() => result?,
        };

        let status = response.status();
        if !status.is_success() {
            let text = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(ClientError::Cancelled),
                text = response.text() => text.unwrap_or_default(),
            };
            tracing::debug!(method = %method, path = %path, status = %status, "Request rejected");
            return Err(ClientError::from_status(status, &text));
        }

        Ok(response)
    }

    /// Send and decode a JSON body
    pub async fn send_json<T: DeserializeOwned>(&self, request: OutboundRequest) -> ClientResult<T> {
        let response = self.send(request).await?;
        let bytes = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(ClientError::Cancelled),
            bytes = response.bytes() => bytes?,
        };
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send_json(OutboundRequest::get(path)).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(OutboundRequest::post(path).with_json(body)?)
            .await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send_json(OutboundRequest::post(path)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(OutboundRequest::new(Method::PUT, path).with_json(body)?)
            .await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(OutboundRequest::new(Method::PATCH, path).with_json(body)?)
            .await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send_json(OutboundRequest::new(Method::DELETE, path))
            .await
    }
}
