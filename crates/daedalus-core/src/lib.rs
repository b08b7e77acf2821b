//! # Daedalus Core
//!
//! Contracts shared by Daedalus applications and the hosts that run them.
//!
//! - [`Application`] - The unit under test, built from an [`ApplicationConfig`](daedalus_config::ApplicationConfig)
//! - [`ApplicationRequest`] - Inbound request contract
//! - [`ApplicationResponse`] - Outbound response contract
//! - [`RequestLine`] - Method, URI and protocol version of a request
//! - [`RequestStatus`] - Outcome of handling a request
//! - [`ApplicationLoader`] - Resolves the configured application type
//! - [`CoreError`] - Standard error type

#![doc(html_root_url = "https://docs.rs/daedalus-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod application;
mod error;
mod request;
mod response;
mod status;

pub use application::{
    application_class, Application, ApplicationFactory, ApplicationLoader, ApplicationRegistry,
    FromConfig,
};
pub use error::{CoreError, CoreResult};
pub use request::{parse_query, query_parameters, ApplicationRequest, Parameters, RequestLine};
pub use response::{ApplicationResponse, ContentWriter, DEFAULT_ENCODING};
pub use status::RequestStatus;
