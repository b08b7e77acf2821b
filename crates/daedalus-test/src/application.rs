//! A placeholder application for tests that only need a host.

use daedalus_config::ApplicationConfig;
use daedalus_core::{Application, ApplicationRequest, CoreResult, FromConfig, RequestStatus};

/// An application that leaves every request unhandled.
///
/// Useful for exercising the host, requests and responses without any
/// routing of your own.
#[derive(Debug, Clone)]
pub struct TestApplication {
    config: ApplicationConfig,
}

impl Application for TestApplication {
    fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    fn handle(&self, request: &mut dyn ApplicationRequest) -> CoreResult<RequestStatus> {
        tracing::trace!(uri = request.uri(), "test application ignores request");
        Ok(RequestStatus::Unhandled)
    }
}

impl FromConfig for TestApplication {
    fn from_config(config: ApplicationConfig) -> CoreResult<Self> {
        Ok(Self { config })
    }
}
