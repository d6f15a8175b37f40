//! Middleware sits between the binder and a route's handler.
//!
//! A route carries an ordered list of [`SharedMiddleware`]; outer scopes come first. Running a
//! route means calling the first middleware with a [`Next`] that points at the rest of the chain,
//! the last link of which is the route's handler.

use crate::handler::{BoxError, Request, RequestHandler, Response};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

pub type SharedMiddleware = Arc<dyn Middleware>;

#[async_trait]
pub trait Middleware: Send + Sync {
    /// Handle the request, calling [`Next::run`] to continue the chain or
    /// returning a response directly to short-circuit it.
    async fn handle(&self, req: Request, next: Next<'_>) -> Result<Response, BoxError>;
}

impl Debug for dyn Middleware {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Middleware")
    }
}

/// The remainder of a middleware chain.
pub struct Next<'a> {
    chain: &'a [SharedMiddleware],
    endpoint: &'a dyn RequestHandler,
}

impl<'a> Next<'a> {
    pub fn new(chain: &'a [SharedMiddleware], endpoint: &'a dyn RequestHandler) -> Self {
        Self { chain, endpoint }
    }

    /// Number of middlewares left before the endpoint is reached.
    pub fn remaining(&self) -> usize {
        self.chain.len()
    }

    pub async fn run(self, req: Request) -> Result<Response, BoxError> {
        match self.chain.split_first() {
            Some((middleware, rest)) => middleware.handle(req, Next::new(rest, self.endpoint)).await,
            None => self.endpoint.invoke(req).await,
        }
    }
}

impl Debug for Next<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next").field("remaining", &self.chain.len()).finish_non_exhaustive()
    }
}

/// a middleware which wraps a closure returning a boxed future
pub struct FnMiddleware<F> {
    f: F,
}

impl<F> Debug for FnMiddleware<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMiddleware").finish_non_exhaustive()
    }
}

/// Creates a middleware from a closure.
///
/// # Example
/// ```
/// use futures::FutureExt;
/// use micro_route::middleware_fn;
///
/// let passthrough = middleware_fn(|req, next| async move { next.run(req).await }.boxed());
/// ```
pub fn middleware_fn<F>(f: F) -> FnMiddleware<F>
where
    F: for<'a> Fn(Request, Next<'a>) -> BoxFuture<'a, Result<Response, BoxError>> + Send + Sync,
{
    FnMiddleware { f }
}

#[async_trait]
impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(Request, Next<'a>) -> BoxFuture<'a, Result<Response, BoxError>> + Send + Sync,
{
    async fn handle(&self, req: Request, next: Next<'_>) -> Result<Response, BoxError> {
        (self.f)(req, next).await
    }
}
