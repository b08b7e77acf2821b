//! In-memory response.

use bytes::Bytes;
use daedalus_core::{
    ApplicationResponse, ContentWriter, CoreError, CoreResult, RequestStatus, DEFAULT_ENCODING,
};
use http::StatusCode;
use std::collections::HashMap;

/// Lifecycle of a [`TestApplicationResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    /// Created, nothing set yet.
    Unset,
    /// A header, status or content has been set.
    Configured,
    /// `send()` has been called.
    Sent,
}

/// A response that records what the application set on it.
///
/// The status code starts at `501 Not Implemented`, so a response nobody
/// configured is easy to spot. Only text content is supported.
#[derive(Debug, Clone)]
pub struct TestApplicationResponse {
    headers: HashMap<String, String>,
    code: StatusCode,
    content: Option<String>,
    state: ResponseState,
}

impl Default for TestApplicationResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApplicationResponse {
    /// Creates an empty response.
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
            code: StatusCode::NOT_IMPLEMENTED,
            content: None,
            state: ResponseState::Unset,
        }
    }

    fn touch(&mut self) {
        match self.state {
            ResponseState::Unset => self.state = ResponseState::Configured,
            ResponseState::Configured => {}
            ResponseState::Sent => tracing::warn!("test response modified after send"),
        }
    }

    /// Returns the status code.
    #[must_use]
    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// Returns the status code as a u16.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.code.as_u16()
    }

    /// Returns the headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Gets a header value, ignoring ASCII case.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the text content, if any was set.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> ResponseState {
        self.state
    }

    /// Returns true once `send()` has been called.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        self.state == ResponseState::Sent
    }

    // Assertion methods

    /// Asserts that the status code equals the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.code, expected,
            "Expected status {}, got {}",
            expected, self.code
        );
        self
    }

    /// Asserts that the status code equals the expected u16 value.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match.
    pub fn assert_status_code(&self, expected: u16) -> &Self {
        assert_eq!(
            self.code.as_u16(),
            expected,
            "Expected status {}, got {}",
            expected,
            self.code.as_u16()
        );
        self
    }

    /// Asserts that a header exists with the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the header doesn't exist or doesn't match.
    pub fn assert_header(&self, name: &str, expected: &str) -> &Self {
        let actual = self
            .header_value(name)
            .unwrap_or_else(|| panic!("Header '{}' not found", name));
        assert_eq!(
            actual, expected,
            "Header '{}': expected '{}', got '{}'",
            name, expected, actual
        );
        self
    }

    /// Asserts that the content equals the expected string.
    ///
    /// # Panics
    ///
    /// Panics if no content was set or it doesn't match.
    pub fn assert_content_eq(&self, expected: &str) -> &Self {
        let content = self.content().expect("Response has no content");
        assert_eq!(content, expected, "Content mismatch");
        self
    }

    /// Asserts that the content contains the expected substring.
    ///
    /// # Panics
    ///
    /// Panics if no content was set or it doesn't contain the substring.
    pub fn assert_content_contains(&self, expected: &str) -> &Self {
        let content = self.content().expect("Response has no content");
        assert!(
            content.contains(expected),
            "Content should contain '{}', got: {}",
            expected,
            content
        );
        self
    }
}

impl ApplicationResponse for TestApplicationResponse {
    fn header(&mut self, name: &str, value: &str) -> &mut dyn ApplicationResponse {
        self.touch();
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    fn status(&mut self, code: StatusCode) -> &mut dyn ApplicationResponse {
        self.touch();
        self.code = code;
        self
    }

    fn content_text(&mut self, text: &str, _encoding: &str) -> &mut dyn ApplicationResponse {
        self.touch();
        self.content = Some(text.to_string());
        self
    }

    fn content_bytes(&mut self, _bytes: Bytes) -> CoreResult<&mut dyn ApplicationResponse> {
        Err(CoreError::unsupported("test responses only record text content"))
    }

    fn content_stream(
        &mut self,
        writer: ContentWriter<'_>,
    ) -> CoreResult<&mut dyn ApplicationResponse> {
        let mut sink = String::new();
        writer(&mut sink)?;
        Ok(self.content_text(&sink, DEFAULT_ENCODING))
    }

    fn send(&mut self) -> RequestStatus {
        self.state = ResponseState::Sent;
        tracing::debug!(
            status = self.code.as_u16(),
            has_content = self.content.is_some(),
            "test response sent"
        );
        RequestStatus::Handled
    }
}
