//! In-memory request.

use crate::response::TestApplicationResponse;
use daedalus_core::{
    Application, ApplicationRequest, ApplicationResponse, CoreError, CoreResult, RequestLine,
};
use http::Method;
use std::collections::HashMap;
use std::fmt;

/// A request built in memory and dispatched to an application under test.
///
/// Starts as `GET / HTTP/1.1` with no headers and an empty body. The handler
/// may create one [`TestApplicationResponse`] through
/// [`create_response`](ApplicationRequest::create_response).
pub struct TestApplicationRequest<'a> {
    application: &'a dyn Application,
    request_line: RequestLine,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: String,
    response: Option<TestApplicationResponse>,
}

impl<'a> TestApplicationRequest<'a> {
    /// Creates a request bound to `application`.
    pub fn new(application: &'a dyn Application) -> Self {
        Self {
            application,
            request_line: RequestLine::default(),
            headers: HashMap::new(),
            body: String::new(),
            response: None,
        }
    }

    /// Sets the URI, keeping the method and protocol version.
    pub fn set_uri(&mut self, uri: impl Into<String>) -> &mut Self {
        self.request_line = self.request_line.with_uri(uri);
        self
    }

    /// Sets the method, keeping the URI and protocol version.
    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.request_line = self.request_line.with_method(method);
        self
    }

    /// Sets a header, replacing any previous value under the same name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the body.
    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// Returns the response created by the handler, if any.
    pub fn response(&self) -> Option<&TestApplicationResponse> {
        self.response.as_ref()
    }

    /// Consumes the request, returning the response created by the handler.
    pub fn into_response(self) -> Option<TestApplicationResponse> {
        self.response
    }
}

impl ApplicationRequest for TestApplicationRequest<'_> {
    fn application(&self) -> &dyn Application {
        self.application
    }

    fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn create_response(&mut self) -> CoreResult<&mut dyn ApplicationResponse> {
        if self.response.is_some() {
            tracing::warn!(request_line = %self.request_line, "second response requested");
            return Err(CoreError::invalid_state(
                "a request may produce at most one response; make sure the handler creates its response once",
            ));
        }
        Ok(self.response.insert(TestApplicationResponse::new()))
    }
}

impl fmt::Debug for TestApplicationRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestApplicationRequest")
            .field("request_line", &self.request_line)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .field("response", &self.response)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestApplication;
    use daedalus_config::ApplicationConfig;
    use daedalus_core::FromConfig;
    use http::{StatusCode, Version};
    use proptest::prelude::*;

    fn app() -> TestApplication {
        TestApplication::from_config(ApplicationConfig::new())
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let app = app();
        let request = TestApplicationRequest::new(&app);
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri(), "/");
        assert_eq!(request.request_line().version, Version::HTTP_11);
        assert!(request.headers.is_empty());
        assert_eq!(request.body(), "");
        assert!(request.response().is_none());
    }

    #[test]
    fn test_set_uri_keeps_method() {
        let app = app();
        let mut request = TestApplicationRequest::new(&app);
        request.set_method(Method::DELETE).set_uri("/items/7");
        assert_eq!(request.uri(), "/items/7");
        assert_eq!(request.method(), Method::DELETE);
    }

    #[test]
    fn test_parameters_follow_uri() {
        let app = app();
        let mut request = TestApplicationRequest::new(&app);
        request.set_uri("/search?q=a&q=b&x=1");

        let parameters = request.parameters();
        assert_eq!(parameters["q"], vec!["a", "b"]);
        assert_eq!(parameters["x"], vec!["1"]);
        assert_eq!(parameters.len(), 2);

        request.set_uri("/search");
        assert!(request.parameters().is_empty());
    }

    #[test]
    fn test_headers_and_body() {
        let app = app();
        let mut request = TestApplicationRequest::new(&app);
        request
            .add_header("Content-Type", "text/plain")
            .add_header("Content-Type", "application/json")
            .set_body("{}");
        request.headers.insert("X-Trace".to_string(), "1".to_string());

        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("x-trace"), Some("1"));
        assert_eq!(request.body(), "{}");
    }

    #[test]
    fn test_create_response_once() {
        let app = app();
        let mut request = TestApplicationRequest::new(&app);

        let response = request.create_response().unwrap();
        response.status(StatusCode::OK);

        let err = request.create_response().err().unwrap();
        assert!(err.is_invalid_state());

        let response = request.into_response().unwrap();
        assert_eq!(response.code(), StatusCode::OK);
    }

    #[test]
    fn test_created_response_defaults_to_501() {
        let app = app();
        let mut request = TestApplicationRequest::new(&app);
        request.create_response().unwrap();
        assert_eq!(request.response().unwrap().status_code(), 501);
    }

    #[test]
    fn test_application_is_exposed() {
        let app = app();
        let request = TestApplicationRequest::new(&app);
        assert_eq!(request.application().config(), &ApplicationConfig::new());
    }

    fn methods() -> impl Strategy<Value = Method> {
        prop::sample::select(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
    }

    proptest! {
        #[test]
        fn prop_uri_setter_keeps_method(method in methods(), uri in "/[a-z0-9/?=&]{0,32}") {
            let app = app();
            let mut request = TestApplicationRequest::new(&app);
            request.set_method(method.clone());
            request.set_uri(uri.clone());
            prop_assert_eq!(request.uri(), uri.as_str());
            prop_assert_eq!(request.method(), &method);
        }

        #[test]
        fn prop_method_setter_keeps_uri(method in methods(), uri in "/[a-z0-9/?=&]{0,32}") {
            let app = app();
            let mut request = TestApplicationRequest::new(&app);
            request.set_uri(uri.clone());
            request.set_method(method.clone());
            prop_assert_eq!(request.method(), &method);
            prop_assert_eq!(request.uri(), uri.as_str());
        }
    }
}
