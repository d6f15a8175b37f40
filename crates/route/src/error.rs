use crate::resolve::ResolveError;
use thiserror::Error;

/// Every way building a route table can fail.
///
/// All of them are programmer errors in the route declarations: the build step that raised one
/// is abandoned, while the builder's prefix and configuration scope stay intact.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("malformed handler reference '{reference}', expected 'Controller.member'")]
    MalformedReference { reference: String },

    #[error("resolution error: {source}")]
    Resolution {
        #[from]
        source: ResolveError,
    },

    #[error("member '{member}' not found in controller '{controller}'")]
    MemberNotFound { controller: String, member: String },

    #[error("middleware '{middleware}' does not expose a 'handle' member")]
    MiddlewareHandleNotFound { middleware: String },
}

impl RouteError {
    pub fn invalid_argument<S: ToString>(str: S) -> Self {
        Self::InvalidArgument { reason: str.to_string() }
    }

    pub fn malformed_reference<S: ToString>(reference: S) -> Self {
        Self::MalformedReference { reference: reference.to_string() }
    }

    pub fn member_not_found<C: ToString, M: ToString>(controller: C, member: M) -> Self {
        Self::MemberNotFound { controller: controller.to_string(), member: member.to_string() }
    }

    pub fn middleware_handle_not_found<S: ToString>(middleware: S) -> Self {
        Self::MiddlewareHandleNotFound { middleware: middleware.to_string() }
    }
}

/// Raised when a [`RouteBuilder`](crate::RouteBuilder) is built with missing settings.
#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("resolver must be set")]
    MissingResolver,
}
