//! Scoped route configuration.
//!
//! Every `group`, `resource` and verb call may contribute a [`ConfigFragment`]. The fragments
//! enclosing the point of registration form a [`ConfigStack`] (outermost first), which is folded
//! into the [`EffectiveConfig`] stored on each route.
//!
//! # Folding rules
//!
//! - middlewares are concatenated in stack order, so outer scopes always run first
//! - aliases are concatenated in stack order
//! - if the innermost fragment has no alias at all, the accumulated alias is dropped and the
//!   effective alias is empty

use crate::error::RouteError;
use crate::middleware::{FnMiddleware, Middleware, SharedMiddleware};
use crate::resolve::{resolve_middleware, Resolver};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::trace;

/// A reference to a middleware: either a name resolved through [`Resolver::middleware`],
/// or a middleware given inline.
#[derive(Clone)]
pub enum MiddlewareRef {
    Named(String),
    Inline(SharedMiddleware),
}

impl MiddlewareRef {
    pub fn inline<M: Middleware + 'static>(middleware: M) -> Self {
        Self::Inline(Arc::new(middleware))
    }
}

impl Debug for MiddlewareRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Inline(_) => f.write_str("Inline"),
        }
    }
}

impl From<&str> for MiddlewareRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for MiddlewareRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<SharedMiddleware> for MiddlewareRef {
    fn from(middleware: SharedMiddleware) -> Self {
        Self::Inline(middleware)
    }
}

impl<F> From<FnMiddleware<F>> for MiddlewareRef
where
    FnMiddleware<F>: Middleware + 'static,
{
    fn from(middleware: FnMiddleware<F>) -> Self {
        Self::Inline(Arc::new(middleware))
    }
}

/// The middleware field of a fragment: a single reference or a sequence of them.
#[derive(Clone, Debug)]
pub enum MiddlewareSpec {
    One(MiddlewareRef),
    Many(Vec<MiddlewareRef>),
}

/// One scope's contribution to route configuration.
#[derive(Clone, Debug, Default)]
pub struct ConfigFragment {
    middleware: Option<MiddlewareSpec>,
    alias: Option<String>,
}

impl ConfigFragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single middleware reference.
    ///
    /// A single named reference that is the empty string contributes nothing.
    #[must_use]
    pub fn middleware(mut self, middleware: impl Into<MiddlewareRef>) -> Self {
        self.middleware = Some(MiddlewareSpec::One(middleware.into()));
        self
    }

    /// Sets a sequence of middleware references, kept in the given order.
    #[must_use]
    pub fn middlewares<I>(mut self, middlewares: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<MiddlewareRef>,
    {
        self.middleware = Some(MiddlewareSpec::Many(middlewares.into_iter().map(Into::into).collect()));
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn middleware_spec(&self) -> Option<&MiddlewareSpec> {
        self.middleware.as_ref()
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    fn collect_middlewares(&self, resolver: &dyn Resolver, out: &mut Vec<SharedMiddleware>) -> Result<(), RouteError> {
        match &self.middleware {
            None => {}
            Some(MiddlewareSpec::One(MiddlewareRef::Named(name))) if name.is_empty() => {}
            Some(MiddlewareSpec::One(middleware)) => out.push(resolve_middleware(resolver, middleware)?),
            Some(MiddlewareSpec::Many(middlewares)) => {
                for middleware in middlewares {
                    out.push(resolve_middleware(resolver, middleware)?);
                }
            }
        }
        Ok(())
    }
}

/// The configuration folded from a [`ConfigStack`] at the point a route is registered.
#[derive(Clone, Default)]
pub struct EffectiveConfig {
    middlewares: Vec<SharedMiddleware>,
    alias: String,
}

impl EffectiveConfig {
    pub fn middlewares(&self) -> &[SharedMiddleware] {
        &self.middlewares
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl Debug for EffectiveConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectiveConfig")
            .field("middlewares", &self.middlewares.len())
            .field("alias", &self.alias)
            .finish()
    }
}

/// The fragments of every scope enclosing the point of registration, outermost first.
///
/// A stack is a value: [`ConfigStack::push`] returns a new stack and leaves the receiver as it
/// was, so a scope can keep its snapshot and put it back once it is done.
#[derive(Clone, Debug, Default)]
pub struct ConfigStack {
    fragments: Vec<triomphe::Arc<ConfigFragment>>,
}

impl ConfigStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn push(&self, fragment: ConfigFragment) -> Self {
        let mut fragments = self.fragments.clone();
        fragments.push(triomphe::Arc::new(fragment));
        Self { fragments }
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigFragment> {
        self.fragments.iter().map(|fragment| &**fragment)
    }

    pub fn last(&self) -> Option<&ConfigFragment> {
        self.fragments.last().map(|fragment| &**fragment)
    }

    /// Folds the stack into one [`EffectiveConfig`], resolving named middlewares on the way.
    pub fn merge(&self, resolver: &dyn Resolver) -> Result<EffectiveConfig, RouteError> {
        let mut middlewares = Vec::new();
        let mut alias = String::new();

        for fragment in self.iter() {
            fragment.collect_middlewares(resolver, &mut middlewares)?;
            if let Some(name) = fragment.alias_name() {
                alias.push_str(name);
            }
        }

        // the innermost fragment has the final say over naming
        if self.last().is_some_and(|fragment| fragment.alias_name().is_none()) {
            alias.clear();
        }

        trace!(fragments = self.len(), middlewares = middlewares.len(), alias = alias.as_str(), "merged config stack");
        Ok(EffectiveConfig { middlewares, alias })
    }
}

/// Two stacks are equal when they hold the very same fragments in the same order.
impl PartialEq for ConfigStack {
    fn eq(&self, other: &Self) -> bool {
        self.fragments.len() == other.fragments.len()
            && self.fragments.iter().zip(other.fragments.iter()).all(|(a, b)| triomphe::Arc::ptr_eq(a, b))
    }
}

impl Eq for ConfigStack {}
