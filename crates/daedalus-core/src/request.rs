//! Request contract.
//!
//! The [`ApplicationRequest`] trait is what an [`Application`] sees when it
//! handles a request. Network-backed servers and the in-memory test host
//! implement it alike.

use crate::{Application, ApplicationResponse, CoreResult};
use http::{Method, Version};
use std::collections::HashMap;
use std::fmt;

/// Query parameters: name to values in order of appearance.
pub type Parameters = HashMap<String, Vec<String>>;

/// The first line of an HTTP request.
///
/// A request line is a value. Changing one field produces a new line with
/// every other field carried over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// HTTP method
    pub method: Method,
    /// Request target, including any query string
    pub uri: String,
    /// Protocol version
    pub version: Version,
}

impl RequestLine {
    /// Creates a request line.
    pub fn new(method: Method, uri: impl Into<String>, version: Version) -> Self {
        Self {
            method,
            uri: uri.into(),
            version,
        }
    }

    /// Returns a copy of this line with a different URI.
    #[must_use]
    pub fn with_uri(&self, uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..self.clone()
        }
    }

    /// Returns a copy of this line with a different method.
    #[must_use]
    pub fn with_method(&self, method: Method) -> Self {
        Self {
            method,
            ..self.clone()
        }
    }

    /// Returns the URI without its query string or fragment.
    pub fn path(&self) -> &str {
        let target = self.target();
        target.split_once('?').map_or(target, |(path, _)| path)
    }

    /// Returns the raw query string, if any. The fragment is not included.
    pub fn query(&self) -> Option<&str> {
        self.target().split_once('?').map(|(_, query)| query)
    }

    fn target(&self) -> &str {
        strip_fragment(&self.uri)
    }
}

impl Default for RequestLine {
    fn default() -> Self {
        Self::new(Method::GET, "/", Version::HTTP_11)
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.method, self.uri, self.version)
    }
}

/// An inbound request as seen by an application.
pub trait ApplicationRequest {
    /// The application this request is dispatched to.
    fn application(&self) -> &dyn Application;

    /// The request line.
    fn request_line(&self) -> &RequestLine;

    /// Request headers. Keys are unique.
    fn headers(&self) -> &HashMap<String, String>;

    /// Request body.
    fn body(&self) -> &str;

    /// Creates the response for this request.
    ///
    /// A request produces at most one response. Implementations fail with
    /// [`CoreError::InvalidState`](crate::CoreError::InvalidState) on every
    /// call after the first.
    fn create_response(&mut self) -> CoreResult<&mut dyn ApplicationResponse>;

    /// HTTP method.
    fn method(&self) -> &Method {
        &self.request_line().method
    }

    /// Request URI, including any query string.
    fn uri(&self) -> &str {
        &self.request_line().uri
    }

    /// Looks up a header, ignoring ASCII case.
    fn header(&self, name: &str) -> Option<&str> {
        self.headers()
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Query parameters parsed from the current URI.
    fn parameters(&self) -> Parameters {
        query_parameters(self.uri())
    }
}

/// Parses the query string of `uri` into [`Parameters`].
///
/// Anything after `#` is ignored. A URI without `?` has no parameters.
pub fn query_parameters(uri: &str) -> Parameters {
    strip_fragment(uri)
        .split_once('?')
        .map(|(_, query)| parse_query(query))
        .unwrap_or_default()
}

/// Parses an `application/x-www-form-urlencoded` query string.
///
/// Repeated names accumulate values. A name without `=` gets an empty value.
/// Escapes that do not decode to UTF-8 are replaced with U+FFFD.
pub fn parse_query(query: &str) -> Parameters {
    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
        Ok(pairs) => pairs,
        Err(e) => {
            tracing::debug!(query, error = %e, "ignoring malformed query string");
            return Parameters::new();
        }
    };

    let mut parameters = Parameters::new();
    for (name, value) in pairs {
        parameters.entry(name).or_default().push(value);
    }
    parameters
}

fn strip_fragment(uri: &str) -> &str {
    uri.split_once('#').map_or(uri, |(before, _)| before)
}
