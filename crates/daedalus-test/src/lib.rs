//! # Daedalus Test
//!
//! In-process testing for Daedalus applications: build the application,
//! synthesize a request in memory, run it through the application's handler,
//! and inspect the response. No socket is opened and no port is bound.
//!
//! ## Key Features
//!
//! - **Test Runner**: [`with_application`] loads the application in the `test` environment
//! - **Mock Request**: [`TestApplicationRequest`] is configured by the test before dispatch
//! - **Mock Response**: [`TestApplicationResponse`] records what the handler set
//! - **Assertions**: chainable helpers on responses and results
//!
//! ## Example
//!
//! ```
//! use daedalus_config::ApplicationConfig;
//! use daedalus_core::{
//!     Application, ApplicationRequest, CoreResult, FromConfig, RequestStatus,
//! };
//! use daedalus_test::with_application;
//! use http::{Method, StatusCode};
//!
//! struct Ping {
//!     config: ApplicationConfig,
//! }
//!
//! impl Application for Ping {
//!     fn config(&self) -> &ApplicationConfig {
//!         &self.config
//!     }
//!
//!     fn handle(&self, request: &mut dyn ApplicationRequest) -> CoreResult<RequestStatus> {
//!         if request.uri() != "/ping" {
//!             return Ok(RequestStatus::Unhandled);
//!         }
//!         Ok(request
//!             .create_response()?
//!             .status(StatusCode::OK)
//!             .content_text("pong", "utf-8")
//!             .send())
//!     }
//! }
//!
//! impl FromConfig for Ping {
//!     fn from_config(config: ApplicationConfig) -> CoreResult<Self> {
//!         Ok(Self { config })
//!     }
//! }
//!
//! with_application::<Ping, _, _>(|host| {
//!     let result = host.handle_request_to(Method::GET, "/ping", |_| {}).unwrap();
//!     result
//!         .assert_handled()
//!         .assert_status_code(200)
//!         .assert_content_eq("pong");
//! })
//! .unwrap();
//! ```
//!
//! ## Limitations
//!
//! Requests are handled one at a time on the calling thread, each request
//! produces at most one response, and responses only record text content:
//! [`content_bytes`](daedalus_core::ApplicationResponse::content_bytes)
//! always fails with an unsupported-operation error.

#![doc(html_root_url = "https://docs.rs/daedalus-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod application;
mod error;
mod host;
mod logging;
mod request;
mod response;

pub use application::TestApplication;
pub use error::TestError;
pub use host::{
    test_config, with_application, with_application_class, with_application_config,
    RequestResult, TestApplicationHost, TEST_LOG_NAME,
};
pub use logging::{init_test_logging, DEFAULT_TEST_LOG_LEVEL};
pub use request::TestApplicationRequest;
pub use response::{ResponseState, TestApplicationResponse};

pub use daedalus_core::{ApplicationRequest, ApplicationResponse};
