//! HTTP response type.

use std::collections::HashMap;

use crate::error::HandlerError;

const CONTENT_TYPE: &str = "Content-Type";
const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

/// An HTTP response produced by a handler.
///
/// A handler returns exactly one of these, so status, content type and body
/// are written once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates an empty response with the given status.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response.
    #[must_use]
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Serializes `data` as a JSON body with the given status.
    pub fn json<T: serde::Serialize + ?Sized>(status: u16, data: &T) -> Result<Self, HandlerError> {
        let body = serde_json::to_vec(data)?;
        Ok(Self::new(status).header(CONTENT_TYPE, JSON).body(body))
    }

    /// Creates a 200 response with a plain text body.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::ok()
            .header(CONTENT_TYPE, TEXT)
            .body(body.into().into_bytes())
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found() -> Self {
        Self::text("Not Found").status(404)
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_server_error() -> Self {
        Self::text("Internal Server Error").status(500)
    }

    /// Creates a 500 response whose body is the error message.
    #[must_use]
    pub fn internal_server_error_with(err: &HandlerError) -> Self {
        Self::text(err.to_string()).status(500)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the status code.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the `Content-Type` header, if set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).map(String::as_str)
    }

    /// Returns the body as a string.
    #[must_use]
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_json() {
        let data = serde_json::json!({"name": "test"});
        let res = Response::json(201, &data).unwrap();
        assert_eq!(res.status, 201);
        assert_eq!(res.content_type(), Some("application/json"));
        assert_eq!(res.body_string(), Some(r#"{"name":"test"}"#.to_string()));
    }

    #[test]
    fn test_error_responses() {
        assert_eq!(Response::not_found().status, 404);
        assert_eq!(Response::not_found().body_string(), Some("Not Found".to_string()));

        let err = HandlerError::msg("database unavailable");
        let res = Response::internal_server_error_with(&err);
        assert_eq!(res.status, 500);
        assert_eq!(res.body_string(), Some("database unavailable".to_string()));
    }

    #[test]
    fn test_response_builder() {
        let res = Response::ok().header("X-Custom", "value").body("Hello");

        assert_eq!(res.status, 200);
        assert_eq!(res.headers.get("X-Custom").map(String::as_str), Some("value"));
        assert_eq!(res.body_string(), Some("Hello".to_string()));
    }
}
