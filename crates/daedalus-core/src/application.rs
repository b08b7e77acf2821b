//! Applications and how they are loaded.
//!
//! An [`Application`] is built from an [`ApplicationConfig`] and handles
//! requests. The configuration names the application type through
//! [`APPLICATION_CLASS_KEY`](daedalus_config::APPLICATION_CLASS_KEY); the
//! [`ApplicationLoader`] resolves that name against an [`ApplicationRegistry`].
//!
//! # Example
//!
//! ```
//! use daedalus_config::{ApplicationConfig, APPLICATION_CLASS_KEY};
//! use daedalus_core::{
//!     application_class, Application, ApplicationLoader, ApplicationRegistry,
//!     ApplicationRequest, CoreResult, FromConfig, RequestStatus,
//! };
//!
//! struct Hello {
//!     config: ApplicationConfig,
//! }
//!
//! impl Application for Hello {
//!     fn config(&self) -> &ApplicationConfig {
//!         &self.config
//!     }
//!
//!     fn handle(&self, _request: &mut dyn ApplicationRequest) -> CoreResult<RequestStatus> {
//!         Ok(RequestStatus::Unhandled)
//!     }
//! }
//!
//! impl FromConfig for Hello {
//!     fn from_config(config: ApplicationConfig) -> CoreResult<Self> {
//!         Ok(Self { config })
//!     }
//! }
//!
//! let mut registry = ApplicationRegistry::new();
//! registry.register::<Hello>();
//!
//! let config = ApplicationConfig::from_map([(APPLICATION_CLASS_KEY, application_class::<Hello>())]);
//! let app = ApplicationLoader::new(config, &registry).load().unwrap();
//! assert!(app.config().contains(APPLICATION_CLASS_KEY));
//! ```

use crate::{ApplicationRequest, CoreError, CoreResult, RequestStatus};
use daedalus_config::ApplicationConfig;
use std::collections::HashMap;
use std::fmt;

/// The unit under test: owns routing and request handling.
pub trait Application {
    /// The configuration this application was built from.
    fn config(&self) -> &ApplicationConfig;

    /// Handles a request synchronously.
    fn handle(&self, request: &mut dyn ApplicationRequest) -> CoreResult<RequestStatus>;
}

/// Applications that can be built from a configuration.
pub trait FromConfig: Application + Sized + 'static {
    /// Builds the application.
    fn from_config(config: ApplicationConfig) -> CoreResult<Self>;
}

/// Fully-qualified type name used to identify application type `A`.
pub fn application_class<A: ?Sized>() -> &'static str {
    std::any::type_name::<A>()
}

/// Builds a boxed application from a configuration.
pub type ApplicationFactory = fn(ApplicationConfig) -> CoreResult<Box<dyn Application>>;

fn construct<A: FromConfig>(config: ApplicationConfig) -> CoreResult<Box<dyn Application>> {
    Ok(Box::new(A::from_config(config)?))
}

/// Application factories keyed by type name.
#[derive(Default, Clone)]
pub struct ApplicationRegistry {
    factories: HashMap<String, ApplicationFactory>,
}

impl ApplicationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers `A` under [`application_class::<A>()`](application_class).
    pub fn register<A: FromConfig>(&mut self) -> &mut Self {
        self.register_factory(application_class::<A>(), construct::<A>)
    }

    /// Registers a factory under an explicit name.
    pub fn register_factory(
        &mut self,
        class: impl Into<String>,
        factory: ApplicationFactory,
    ) -> &mut Self {
        self.factories.insert(class.into(), factory);
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    #[must_use]
    pub fn with<A: FromConfig>(mut self) -> Self {
        self.register::<A>();
        self
    }

    /// Returns the factory registered under `class`.
    pub fn factory(&self, class: &str) -> Option<ApplicationFactory> {
        self.factories.get(class).copied()
    }

    /// Returns true if a factory is registered under `class`.
    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    /// Returns the number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ApplicationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut classes: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        classes.sort_unstable();
        f.debug_struct("ApplicationRegistry")
            .field("classes", &classes)
            .finish()
    }
}

/// Builds the application named by a configuration.
#[derive(Debug)]
pub struct ApplicationLoader<'r> {
    config: ApplicationConfig,
    registry: &'r ApplicationRegistry,
}

impl<'r> ApplicationLoader<'r> {
    /// Creates a loader for `config`, resolving types against `registry`.
    pub fn new(config: ApplicationConfig, registry: &'r ApplicationRegistry) -> Self {
        Self { config, registry }
    }

    /// Loads the application.
    ///
    /// Errors returned by the application's constructor are passed through
    /// unchanged.
    pub fn load(self) -> CoreResult<Box<dyn Application>> {
        let class = self.config.application_class()?.to_string();
        let factory = self
            .registry
            .factory(&class)
            .ok_or_else(|| CoreError::unknown_application(&class))?;

        tracing::info!(
            class = %class,
            environment = self.config.environment(),
            "loading application"
        );
        factory(self.config)
    }
}
