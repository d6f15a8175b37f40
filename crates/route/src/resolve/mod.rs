//! Turning handler and middleware references into something callable.
//!
//! String references are looked up through a [`Resolver`], which maps a namespace to a
//! [`Module`](crate::module::Module). Controllers and middleware modules live in separate
//! namespaces.

mod registry;

pub use registry::Registry;
pub use registry::RegistryBuilder;

use crate::config::MiddlewareRef;
use crate::error::RouteError;
use crate::handler::{FnHandler, RequestHandler, SharedHandler};
use crate::middleware::SharedMiddleware;
use crate::module::{Controller, MiddlewareModule, MIDDLEWARE_ENTRY};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

/// Separates the controller name from the member name in a handler reference.
pub const REFERENCE_SEPARATOR: char = '.';

/// Maps namespaces to modules.
///
/// Implementations must be deterministic: resolving the same namespace twice yields the same
/// module (or the same error).
#[cfg_attr(test, mockall::automock)]
pub trait Resolver: Send + Sync {
    fn controller(&self, namespace: &str) -> Result<Arc<Controller>, ResolveError>;

    fn middleware(&self, namespace: &str) -> Result<Arc<MiddlewareModule>, ResolveError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Controller,
    Middleware,
}

impl Display for ModuleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Controller => f.write_str("controller"),
            Self::Middleware => f.write_str("middleware"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{kind} '{namespace}' not found")]
    NotFound { kind: ModuleKind, namespace: String },
}

impl ResolveError {
    pub fn not_found<S: ToString>(kind: ModuleKind, namespace: S) -> Self {
        Self::NotFound { kind, namespace: namespace.to_string() }
    }
}

/// What a route points at: a handler given inline, or a `"Controller.member"` reference.
#[derive(Clone)]
pub enum HandlerTarget {
    Inline(SharedHandler),
    Reference(String),
}

impl HandlerTarget {
    pub fn inline<H: RequestHandler + 'static>(handler: H) -> Self {
        Self::Inline(Arc::new(handler))
    }
}

impl Debug for HandlerTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline(_) => f.write_str("Inline"),
            Self::Reference(reference) => f.debug_tuple("Reference").field(reference).finish(),
        }
    }
}

impl From<&str> for HandlerTarget {
    fn from(reference: &str) -> Self {
        Self::Reference(reference.to_owned())
    }
}

impl From<String> for HandlerTarget {
    fn from(reference: String) -> Self {
        Self::Reference(reference)
    }
}

impl From<SharedHandler> for HandlerTarget {
    fn from(handler: SharedHandler) -> Self {
        Self::Inline(handler)
    }
}

impl<F> From<FnHandler<F>> for HandlerTarget
where
    FnHandler<F>: RequestHandler + 'static,
{
    fn from(handler: FnHandler<F>) -> Self {
        Self::Inline(Arc::new(handler))
    }
}

/// Splits `"Controller.member"` into its two halves.
///
/// The reference must contain exactly one separator with a non-empty name on each side.
pub fn parse_reference(reference: &str) -> Result<(&str, &str), RouteError> {
    match reference.split_once(REFERENCE_SEPARATOR) {
        Some((controller, member))
            if !controller.is_empty() && !member.is_empty() && !member.contains(REFERENCE_SEPARATOR) =>
        {
            Ok((controller, member))
        }
        _ => Err(RouteError::malformed_reference(reference)),
    }
}

pub fn resolve_handler(resolver: &dyn Resolver, target: &HandlerTarget) -> Result<SharedHandler, RouteError> {
    let reference = match target {
        HandlerTarget::Inline(handler) => return Ok(Arc::clone(handler)),
        HandlerTarget::Reference(reference) => reference,
    };

    let (controller_name, member) = parse_reference(reference)?;
    let controller = resolver.controller(controller_name)?;
    trace!(controller = controller_name, member, kind = ?controller.probe(member), "resolving handler");

    controller.bind(member).ok_or_else(|| RouteError::member_not_found(controller_name, member))
}

pub fn resolve_middleware(resolver: &dyn Resolver, middleware: &MiddlewareRef) -> Result<SharedMiddleware, RouteError> {
    let name = match middleware {
        MiddlewareRef::Inline(middleware) => return Ok(Arc::clone(middleware)),
        MiddlewareRef::Named(name) => name,
    };

    let module = resolver.middleware(name)?;
    trace!(middleware = name.as_str(), kind = ?module.probe(MIDDLEWARE_ENTRY), "resolving middleware");

    module.bind(MIDDLEWARE_ENTRY).ok_or_else(|| RouteError::middleware_handle_not_found(name.as_str()))
}
