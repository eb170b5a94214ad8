//! The matcher's view of an incoming request: a method and a path.

use super::HttpMethod;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    uri: String,
    method: HttpMethod,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            uri: "/".to_string(),
            method: HttpMethod::Get,
        }
    }
}

impl Request {
    #[must_use]
    pub fn new(method: HttpMethod, uri: &str) -> Self {
        let mut request = Self {
            uri: String::new(),
            method,
        };
        request.set_uri(uri);
        request
    }

    /// Build from raw strings, as a server adapter would. An unsupported
    /// method falls back to GET.
    #[must_use]
    pub fn from_parts(method: &str, uri: &str) -> Self {
        let mut request = Self::default();
        request.set_http_method(method).set_uri(uri);
        request
    }

    /// Store the path, dropping any query string.
    pub fn set_uri(&mut self, uri: &str) -> &mut Self {
        let path = uri.split_once('?').map_or(uri, |(path, _)| path);
        self.uri = path.to_string();
        self
    }

    /// Unsupported methods are ignored and the current method is kept.
    pub fn set_http_method(&mut self, method: &str) -> &mut Self {
        if let Ok(parsed) = method.parse() {
            self.method = parsed;
        }
        self
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }
}
