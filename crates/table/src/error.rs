use http::Method;
use micro_route::BoxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindError {
    #[error("invalid route path '{path}': {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: matchit::InsertError,
    },
}

impl BindError {
    pub fn invalid_path<S: ToString>(path: S, source: matchit::InsertError) -> Self {
        Self::InvalidPath { path: path.to_string(), source }
    }
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("no route for {method} {path}")]
    NoRoute { method: Method, path: String },

    #[error("handler error: {source}")]
    Handler { source: BoxError },
}

impl DispatchError {
    pub fn no_route<S: ToString>(method: Method, path: S) -> Self {
        Self::NoRoute { method, path: path.to_string() }
    }
}

impl From<BoxError> for DispatchError {
    fn from(source: BoxError) -> Self {
        Self::Handler { source }
    }
}
