use crate::config::EffectiveConfig;
use crate::handler::SharedHandler;
use http::Method;
use serde::Serialize;
use std::fmt::{Debug, Display, Formatter};

/// The verb a route is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    /// matches any method at bind time
    All,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::All => "ALL",
        }
    }

    /// The concrete method for this verb, `None` for [`Verb::All`].
    pub fn method(self) -> Option<Method> {
        match self {
            Self::Get => Some(Method::GET),
            Self::Head => Some(Method::HEAD),
            Self::Post => Some(Method::POST),
            Self::Put => Some(Method::PUT),
            Self::Patch => Some(Method::PATCH),
            Self::Delete => Some(Method::DELETE),
            Self::All => None,
        }
    }

    pub fn matches(self, method: &Method) -> bool {
        self.method().is_none_or(|expected| &expected == method)
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved route, ready to be bound.
#[derive(Clone)]
pub struct Route {
    verb: Verb,
    path: String,
    handler: SharedHandler,
    config: EffectiveConfig,
}

impl Route {
    pub(crate) fn new(verb: Verb, path: String, handler: SharedHandler, config: EffectiveConfig) -> Self {
        Self { verb, path, handler, config }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> &SharedHandler {
        &self.handler
    }

    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    pub fn alias(&self) -> &str {
        self.config.alias()
    }

    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            verb: self.verb,
            path: self.path.clone(),
            alias: self.config.alias().to_owned(),
            middlewares: self.config.middlewares().len(),
        }
    }
}

impl Debug for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("verb", &self.verb)
            .field("path", &self.path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A printable summary of a [`Route`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub verb: Verb,
    pub path: String,
    pub alias: String,
    pub middlewares: usize,
}

/// Routes in registration order, which is also their binding priority.
#[derive(Debug, Clone, Default)]
pub struct RouteList {
    routes: Vec<Route>,
}

impl RouteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn as_slice(&self) -> &[Route] {
        &self.routes
    }

    pub fn to_vec(&self) -> Vec<Route> {
        self.routes.clone()
    }

    pub fn describe(&self) -> Vec<RouteInfo> {
        self.routes.iter().map(Route::info).collect()
    }
}

impl IntoIterator for RouteList {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

impl<'a> IntoIterator for &'a RouteList {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
