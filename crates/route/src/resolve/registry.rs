use crate::module::{Controller, MiddlewareModule};
use crate::resolve::{ModuleKind, ResolveError, Resolver};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// An in-memory [`Resolver`] keyed by module name.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    controllers: HashMap<String, Arc<Controller>>,
    middlewares: HashMap<String, Arc<MiddlewareModule>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }
}

impl Resolver for Registry {
    fn controller(&self, namespace: &str) -> Result<Arc<Controller>, ResolveError> {
        trace!(namespace, "loading controller");
        self.controllers
            .get(namespace)
            .map(Arc::clone)
            .ok_or_else(|| ResolveError::not_found(ModuleKind::Controller, namespace))
    }

    fn middleware(&self, namespace: &str) -> Result<Arc<MiddlewareModule>, ResolveError> {
        trace!(namespace, "loading middleware");
        self.middlewares
            .get(namespace)
            .map(Arc::clone)
            .ok_or_else(|| ResolveError::not_found(ModuleKind::Middleware, namespace))
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    inner: Registry,
}

impl RegistryBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Registers a controller under its own name, replacing any earlier one.
    #[must_use]
    pub fn controller(mut self, controller: Controller) -> Self {
        self.inner.controllers.insert(controller.name().to_owned(), Arc::new(controller));
        self
    }

    /// Registers a middleware module under its own name, replacing any earlier one.
    #[must_use]
    pub fn middleware(mut self, middleware: MiddlewareModule) -> Self {
        self.inner.middlewares.insert(middleware.name().to_owned(), Arc::new(middleware));
        self
    }

    pub fn build(self) -> Registry {
        self.inner
    }
}
