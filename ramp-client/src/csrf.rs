//! CSRF double-submit support
//!
//! The auth service mirrors its CSRF token into a script-readable cookie.
//! The client reads it from the shared jar on every state-changing request
//! and echoes it in a header. It never caches or invents a token.

use reqwest::Method;
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use std::sync::Arc;

/// Methods that carry the CSRF header
pub fn is_state_changing(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Find `name` in a `Cookie` header value (`a=1; b=2`).
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        let value = value.trim();
        (key.trim() == name && !value.is_empty()).then(|| value.to_string())
    })
}

/// Read/clear access to the CSRF cookie in the client's jar
#[derive(Debug, Clone)]
pub struct CsrfCookies {
    jar: Arc<Jar>,
    cookie_name: String,
    origin: Url,
}

impl CsrfCookies {
    pub fn new(jar: Arc<Jar>, cookie_name: impl Into<String>, origin: Url) -> Self {
        Self {
            jar,
            cookie_name: cookie_name.into(),
            origin,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Token the jar would send to `url`, read fresh on every call
    pub fn token_for(&self, url: &Url) -> Option<String> {
        let header = self.jar.cookies(url)?;
        find_cookie(header.to_str().ok()?, &self.cookie_name)
    }

    /// Token visible at the API root
    pub fn token(&self) -> Option<String> {
        self.token_for(&self.origin)
    }

    /// Drop the local copy of the CSRF cookie.
    ///
    /// Best effort: an already-expired cookie replaces the stored one for
    /// the site root and for the API root path.
    pub fn clear(&self) {
        let mut paths = vec!["/".to_string()];
        let root_path = self.origin.path().trim_end_matches('/');
        if !root_path.is_empty() {
            paths.push(root_path.to_string());
        }
        for path in paths {
            let expired = format!(
                "{}=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path={}",
                self.cookie_name, path
            );
            self.jar.add_cookie_str(&expired, &self.origin);
        }
    }
}
