use reqwest::{header, Method};
use serde::Serialize;

use crate::{ApiError, FetchOptions, Result};

/// An owned, re-sendable request description.
///
/// The wrapper rebuilds the `reqwest` request from this value on every
/// attempt, so the body is kept as bytes.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) target: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<Vec<u8>>,
    pub(crate) options: FetchOptions,
}

impl ApiRequest {
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            headers: Vec::new(),
            body: None,
            options: FetchOptions::default(),
        }
    }

    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::GET, target)
    }

    pub fn post(target: impl Into<String>) -> Self {
        Self::new(Method::POST, target)
    }

    pub fn put(target: impl Into<String>) -> Self {
        Self::new(Method::PUT, target)
    }

    pub fn patch(target: impl Into<String>) -> Self {
        Self::new(Method::PATCH, target)
    }

    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(Method::DELETE, target)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds `Authorization: Bearer <token>`.
    pub fn bearer(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref().trim());
        self.header(header::AUTHORIZATION.as_str(), value)
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body and sets the content type.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)
            .map_err(|err| ApiError::Serialization(format!("invalid request body: {err}")))?;
        Ok(self
            .header(header::CONTENT_TYPE.as_str(), "application/json")
            .body(body))
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.options.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn retries(mut self, retries: usize) -> Self {
        self.options.retries = Some(retries);
        self
    }

    pub fn skip_retry(mut self) -> Self {
        self.options.skip_retry = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Joins a relative target onto an optional base URL.
///
/// Absolute `http://` and `https://` targets are returned unchanged.
pub fn resolve_url(base_url: Option<&str>, target: &str) -> String {
    let target = target.trim();
    let is_absolute = target.starts_with("http://") || target.starts_with("https://");
    match base_url {
        Some(base) if !is_absolute => {
            let base = base.trim().trim_end_matches('/');
            let path = target.trim_start_matches('/');
            format!("{base}/{path}")
        }
        _ => target.to_owned(),
    }
}
