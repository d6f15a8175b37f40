use async_trait::async_trait;
use bytes::Bytes;
use std::error::Error;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// The request type every handler and middleware receives.
pub type Request = http::Request<Bytes>;

/// The response type every handler and middleware produces.
pub type Response = http::Response<Bytes>;

/// A handler shared between every route (and every scope) that refers to it.
pub type SharedHandler = Arc<dyn RequestHandler>;

/// The endpoint of a route: receives the request after all middlewares ran.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, req: Request) -> Result<Response, BoxError>;
}

impl Debug for dyn RequestHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn RequestHandler")
    }
}

/// a handler which wraps any async `Fn(Request) -> Result<Response, E>`
pub struct FnHandler<F> {
    f: F,
}

impl<F> Debug for FnHandler<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

pub fn handler_fn<F, Err, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Request) -> Fut,
    Err: Into<BoxError>,
    Fut: Future<Output = Result<Response, Err>>,
{
    FnHandler { f }
}

#[async_trait]
impl<F, Err, Fut> RequestHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Err: Into<BoxError>,
    Fut: Future<Output = Result<Response, Err>> + Send,
{
    async fn invoke(&self, req: Request) -> Result<Response, BoxError> {
        (self.f)(req).await.map_err(Into::into)
    }
}
