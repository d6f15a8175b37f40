//! Capability descriptors for controllers and middleware modules.
//!
//! A [`Module`] is what the [`Resolver`](crate::resolve::Resolver) hands back for a namespace. It
//! tells the router which members exist and whether each one lives on an instance (a fresh
//! instance is created every time the member is bound) or on the type itself.

use crate::handler::{handler_fn, BoxError, Request, RequestHandler, Response, SharedHandler};
use crate::middleware::{Middleware, SharedMiddleware};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A module whose members are request handlers.
pub type Controller = Module<dyn RequestHandler>;

/// A module exposing a `handle` member used as middleware.
pub type MiddlewareModule = Module<dyn Middleware>;

/// Creates a fresh instance and returns the member bound to it.
pub type InstanceBinder<T> = Arc<dyn Fn() -> Arc<T> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// the member needs an instance to be invoked
    Instance,
    /// the member belongs to the type
    Static,
}

pub struct Module<T: ?Sized> {
    name: String,
    instance_members: BTreeMap<String, InstanceBinder<T>>,
    static_members: BTreeMap<String, Arc<T>>,
}

impl<T: ?Sized> Module<T> {
    pub fn builder(name: impl Into<String>) -> ModuleBuilder<T> {
        ModuleBuilder::new(name.into())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks the member up on the instance first, then on the type.
    pub fn probe(&self, member: &str) -> Option<MemberKind> {
        if self.instance_members.contains_key(member) {
            Some(MemberKind::Instance)
        } else if self.static_members.contains_key(member) {
            Some(MemberKind::Static)
        } else {
            None
        }
    }

    pub fn supports(&self, member: &str) -> bool {
        self.probe(member).is_some()
    }

    /// Names of every member this module exposes, instance or static.
    pub fn capabilities(&self) -> BTreeSet<&str> {
        self.instance_members.keys().chain(self.static_members.keys()).map(String::as_str).collect()
    }

    /// Binds the member, following the same order as [`Module::probe`].
    ///
    /// An instance member is bound to an instance created for this call.
    pub fn bind(&self, member: &str) -> Option<Arc<T>> {
        if let Some(binder) = self.instance_members.get(member) {
            return Some(binder());
        }
        self.static_members.get(member).map(Arc::clone)
    }
}

impl<T: ?Sized> Debug for Module<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("instance_members", &self.instance_members.keys().collect::<Vec<_>>())
            .field("static_members", &self.static_members.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub struct ModuleBuilder<T: ?Sized> {
    module: Module<T>,
}

impl<T: ?Sized> ModuleBuilder<T> {
    fn new(name: String) -> Self {
        Self { module: Module { name, instance_members: BTreeMap::new(), static_members: BTreeMap::new() } }
    }

    /// Registers an instance member; `binder` is called every time the member is bound.
    #[must_use]
    pub fn instance<F>(mut self, member: impl Into<String>, binder: F) -> Self
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        self.module.instance_members.insert(member.into(), Arc::new(binder));
        self
    }

    #[must_use]
    pub fn static_member(mut self, member: impl Into<String>, value: Arc<T>) -> Self {
        self.module.static_members.insert(member.into(), value);
        self
    }

    pub fn build(self) -> Module<T> {
        self.module
    }
}

impl<T: ?Sized> Debug for ModuleBuilder<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleBuilder").field("module", &self.module).finish()
    }
}

impl ModuleBuilder<dyn RequestHandler> {
    /// Registers an instance method of controller `C`.
    ///
    /// Each bind creates a `C::default()` and hands it to `method` on every request.
    #[must_use]
    pub fn method<C, F, Err, Fut>(self, member: impl Into<String>, method: F) -> Self
    where
        C: Default + Send + Sync + 'static,
        F: Fn(Arc<C>, Request) -> Fut + Send + Sync + 'static,
        Err: Into<BoxError> + 'static,
        Fut: Future<Output = Result<Response, Err>> + Send + 'static,
    {
        let method = Arc::new(method);
        self.instance(member, move || {
            let controller = Arc::new(C::default());
            let method = Arc::clone(&method);
            let handler: SharedHandler = Arc::new(handler_fn(move |req| (*method)(Arc::clone(&controller), req)));
            handler
        })
    }

    /// Registers a static function of the controller.
    #[must_use]
    pub fn static_fn<F, Err, Fut>(self, member: impl Into<String>, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Err: Into<BoxError> + 'static,
        Fut: Future<Output = Result<Response, Err>> + Send + 'static,
    {
        self.static_member(member, Arc::new(handler_fn(f)))
    }
}

impl ModuleBuilder<dyn Middleware> {
    /// Registers `M` as an instance-level `handle` member.
    #[must_use]
    pub fn handle<M>(self) -> Self
    where
        M: Middleware + Default + 'static,
    {
        self.instance(MIDDLEWARE_ENTRY, || {
            let middleware: SharedMiddleware = Arc::new(M::default());
            middleware
        })
    }

    /// Registers a type-level `handle` member.
    #[must_use]
    pub fn static_handle<M: Middleware + 'static>(self, middleware: M) -> Self {
        self.static_member(MIDDLEWARE_ENTRY, Arc::new(middleware))
    }
}

/// The member a middleware module must expose.
pub const MIDDLEWARE_ENTRY: &str = "handle";
