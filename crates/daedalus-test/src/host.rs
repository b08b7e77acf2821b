//! Test host and runner.

use crate::error::TestError;
use crate::request::TestApplicationRequest;
use crate::response::TestApplicationResponse;
use daedalus_config::{
    ApplicationConfig, ConfigLoader, APPLICATION_CLASS_KEY, ENVIRONMENT_KEY, TEST_ENVIRONMENT,
};
use daedalus_core::{
    application_class, Application, ApplicationLoader, ApplicationRegistry, ApplicationRequest,
    FromConfig, RequestStatus,
};
use http::Method;

/// Log name attached to every test run.
pub const TEST_LOG_NAME: &str = "<Test>";

/// Outcome of one simulated request.
#[derive(Debug)]
pub struct RequestResult {
    /// Status reported by the application
    pub status: RequestStatus,
    /// Response created while handling, if any
    pub response: Option<TestApplicationResponse>,
}

impl RequestResult {
    /// Creates a result.
    pub fn new(status: RequestStatus, response: Option<TestApplicationResponse>) -> Self {
        Self { status, response }
    }

    /// Returns true if the application handled the request.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        self.status.is_handled()
    }

    /// Returns the response, if one was created.
    #[must_use]
    pub fn response(&self) -> Option<&TestApplicationResponse> {
        self.response.as_ref()
    }

    /// Asserts that the request was handled and returns its response.
    ///
    /// # Panics
    ///
    /// Panics if the status is not `Handled` or no response was created.
    pub fn assert_handled(&self) -> &TestApplicationResponse {
        assert!(
            self.is_handled(),
            "Expected request to be handled, got {}",
            self.status
        );
        self.response
            .as_ref()
            .expect("Request was handled but no response was created")
    }
}

/// Hosts one application instance and dispatches in-memory requests to it.
pub struct TestApplicationHost {
    application: Box<dyn Application>,
}

impl TestApplicationHost {
    /// Loads the application named by `config` from `registry`.
    ///
    /// Construction errors are returned unchanged.
    pub fn new(
        config: ApplicationConfig,
        registry: &ApplicationRegistry,
    ) -> Result<Self, TestError> {
        let application = ApplicationLoader::new(config, registry).load()?;
        Ok(Self { application })
    }

    /// The application under test.
    pub fn application(&self) -> &dyn Application {
        self.application.as_ref()
    }

    /// The configuration the application was built from.
    pub fn config(&self) -> &ApplicationConfig {
        self.application.config()
    }

    /// Builds a request, lets `setup` configure it, and dispatches it.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let result = host.handle_request(|request| {
    ///     request.set_method(Method::POST).set_uri("/orders").set_body("{}");
    /// })?;
    /// ```
    pub fn handle_request<F>(&self, setup: F) -> Result<RequestResult, TestError>
    where
        F: FnOnce(&mut TestApplicationRequest<'_>),
    {
        let mut request = TestApplicationRequest::new(self.application.as_ref());
        setup(&mut request);

        tracing::debug!(request_line = %request.request_line(), "dispatching test request");
        let status = self.application.handle(&mut request)?;
        let result = RequestResult::new(status, request.into_response());

        tracing::debug!(
            status = %result.status,
            responded = result.response.is_some(),
            "test request completed"
        );
        Ok(result)
    }

    /// Like [`handle_request`](Self::handle_request) with the method and URI preset.
    pub fn handle_request_to<F>(
        &self,
        method: Method,
        uri: impl Into<String>,
        setup: F,
    ) -> Result<RequestResult, TestError>
    where
        F: FnOnce(&mut TestApplicationRequest<'_>),
    {
        self.handle_request(|request| {
            request.set_uri(uri).set_method(method);
            setup(request);
        })
    }

    /// Dispatches a bare `method uri` request.
    pub fn call(&self, method: Method, uri: impl Into<String>) -> Result<RequestResult, TestError> {
        self.handle_request_to(method, uri, |_| {})
    }
}

impl std::fmt::Debug for TestApplicationHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestApplicationHost")
            .field("config", self.config())
            .finish_non_exhaustive()
    }
}

/// The two-entry configuration a test run starts from.
pub fn test_config(class: &str) -> ApplicationConfig {
    ApplicationConfig::from_map(test_entries(class))
}

fn test_entries(class: &str) -> [(&'static str, &str); 2] {
    [
        (ENVIRONMENT_KEY, TEST_ENVIRONMENT),
        (APPLICATION_CLASS_KEY, class),
    ]
}

fn run<F, R>(
    config: ApplicationConfig,
    registry: &ApplicationRegistry,
    test: F,
) -> Result<R, TestError>
where
    F: FnOnce(&TestApplicationHost) -> R,
{
    let class = config.application_class()?.to_string();
    let span = tracing::info_span!("test_application", log = TEST_LOG_NAME, class = %class);
    let _guard = span.enter();

    let host = TestApplicationHost::new(config, registry)?;
    Ok(test(&host))
}

/// Loads application `A` in the test environment and runs `test` against it.
///
/// # Example
///
/// ```ignore
/// with_application::<Shop, _, _>(|host| {
///     let result = host.call(Method::GET, "/ping").unwrap();
///     result.assert_handled().assert_content_eq("pong");
/// })
/// .unwrap();
/// ```
pub fn with_application<A, F, R>(test: F) -> Result<R, TestError>
where
    A: FromConfig,
    F: FnOnce(&TestApplicationHost) -> R,
{
    let registry = ApplicationRegistry::new().with::<A>();
    run(test_config(application_class::<A>()), &registry, test)
}

/// Like [`with_application`], layering extra TOML settings under the test entries.
///
/// The environment and application class entries always win over `overrides`.
pub fn with_application_config<A, F, R>(overrides: &str, test: F) -> Result<R, TestError>
where
    A: FromConfig,
    F: FnOnce(&TestApplicationHost) -> R,
{
    let registry = ApplicationRegistry::new().with::<A>();
    let config = ConfigLoader::new()
        .with_string(overrides, "toml")?
        .with_map(test_entries(application_class::<A>()))
        .load()?;
    run(config, &registry, test)
}

/// Loads the application registered under `class` and runs `test` against it.
pub fn with_application_class<F, R>(
    class: &str,
    registry: &ApplicationRegistry,
    test: F,
) -> Result<R, TestError>
where
    F: FnOnce(&TestApplicationHost) -> R,
{
    run(test_config(class), registry, test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestApplication;
    use daedalus_core::{CoreError, CoreResult};

    #[test]
    fn test_test_config_has_two_entries() {
        let config = test_config("shop::App");
        assert!(config.is_test());
        assert_eq!(config.application_class().unwrap(), "shop::App");

        let daedalus = config.as_table()["daedalus"].as_object().unwrap();
        assert_eq!(daedalus.len(), 2);
    }

    #[test]
    fn test_with_application_builds_host() {
        let environment = with_application::<TestApplication, _, _>(|host| {
            host.config().environment().to_string()
        })
        .unwrap();
        assert_eq!(environment, "test");
    }

    #[test]
    fn test_unhandled_request() {
        let result = with_application::<TestApplication, _, _>(|host| {
            host.call(Method::GET, "/anything").unwrap()
        })
        .unwrap();

        assert_eq!(result.status, RequestStatus::Unhandled);
        assert!(result.response().is_none());
        assert!(!result.is_handled());
    }

    #[test]
    fn test_unknown_class() {
        let registry = ApplicationRegistry::new();
        let err = with_application_class("missing::App", &registry, |_| ())
            .unwrap_err();
        assert!(matches!(
            err,
            TestError::Application(CoreError::UnknownApplication { .. })
        ));
    }

    struct Broken;

    impl Application for Broken {
        fn config(&self) -> &ApplicationConfig {
            unreachable!("never constructed")
        }

        fn handle(&self, _request: &mut dyn ApplicationRequest) -> CoreResult<RequestStatus> {
            Ok(RequestStatus::Unhandled)
        }
    }

    impl FromConfig for Broken {
        fn from_config(_config: ApplicationConfig) -> CoreResult<Self> {
            Err(CoreError::construction::<Self>("refuses to start"))
        }
    }

    #[test]
    fn test_construction_failure_propagates() {
        let mut ran = false;
        let err = with_application::<Broken, _, _>(|_| ran = true)
            .unwrap_err();
        assert!(!ran);
        assert!(matches!(
            err,
            TestError::Application(CoreError::Construction { .. })
        ));
    }

    #[test]
    fn test_overrides_cannot_replace_test_entries() {
        let overrides = r#"
            greeting = "hi"

            [daedalus.deployment]
            environment = "production"
        "#;

        let (environment, greeting) =
            with_application_config::<TestApplication, _, _>(overrides, |host| {
                (
                    host.config().environment().to_string(),
                    host.config().string("greeting").map(str::to_string),
                )
            })
            .unwrap();

        assert_eq!(environment, "test");
        assert_eq!(greeting.as_deref(), Some("hi"));
    }

    #[test]
    fn test_invalid_overrides() {
        let err = with_application_config::<TestApplication, _, _>("not = = toml", |_| ())
            .unwrap_err();
        assert!(matches!(err, TestError::Config(_)));
    }

    #[test]
    #[should_panic(expected = "Expected request to be handled")]
    fn test_assert_handled_panics_when_unhandled() {
        RequestResult::new(RequestStatus::Unhandled, None).assert_handled();
    }
}
