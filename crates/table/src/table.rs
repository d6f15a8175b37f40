use crate::error::{BindError, DispatchError};
use crate::params::PathParams;
use http::{Extensions, Method};
use micro_route::{Next, Request, RequestHandler, Response, Route, RouteList, SharedHandler, SharedMiddleware, Verb};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

type InnerRouter<T> = matchit::Router<T>;

/// Bound routes, ready to dispatch requests.
pub struct RouteTable {
    inner_router: InnerRouter<Vec<Binding>>,
    aliases: HashMap<String, String>,
    default_handler: Option<SharedHandler>,
    extensions: Extensions,
}

/// One route as seen by the table: its verb filter, middleware chain and handler.
pub struct Binding {
    verb: Verb,
    path: String,
    alias: String,
    middlewares: Vec<SharedMiddleware>,
    handler: SharedHandler,
}

/// Result of matching a path, containing matched bindings and path parameters
pub struct RouteMatch<'table> {
    bindings: &'table [Binding],
    params: PathParams,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Matches a path against the bound routes
    ///
    /// An unknown path yields an empty [`RouteMatch`].
    pub fn at(&self, path: &str) -> RouteMatch<'_> {
        self.inner_router
            .at(path)
            .map(|matched| RouteMatch { bindings: matched.value.as_slice(), params: matched.params.into() })
            .map_err(|e| debug!("match '{}' error: {}", path, e))
            .unwrap_or(RouteMatch::empty())
    }

    /// Finds the binding that serves `method` on `path`, first registered wins.
    pub fn find(&self, method: &Method, path: &str) -> Option<(&Binding, PathParams)> {
        let route_match = self.at(path);
        let binding = route_match.bindings.iter().find(|binding| binding.verb.matches(method))?;
        Some((binding, route_match.params))
    }

    /// The path of the first route registered under `alias`.
    pub fn path_for(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Runs the request through the matched route's middlewares and handler.
    pub async fn dispatch(&self, mut req: Request) -> Result<Response, DispatchError> {
        req.extensions_mut().extend(self.extensions.clone());

        let path = req.uri().path().to_owned();
        match self.find(req.method(), &path) {
            Some((binding, params)) => {
                req.extensions_mut().insert(params);
                let resp = Next::new(&binding.middlewares, binding.handler.as_ref()).run(req).await;
                resp.map_err(|e| {
                    error!(verb = %binding.verb, path = binding.path.as_str(), cause = %e, "handler failed");
                    DispatchError::from(e)
                })
            }
            None => match &self.default_handler {
                Some(default_handler) => {
                    warn!(method = %req.method(), path = path.as_str(), "no route matched, using default handler");
                    req.extensions_mut().insert(PathParams::empty());
                    default_handler.invoke(req).await.map_err(DispatchError::from)
                }
                None => Err(DispatchError::no_route(req.method().clone(), path)),
            },
        }
    }
}

impl Debug for RouteTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("aliases", &self.aliases)
            .field("default_handler", &self.default_handler.is_some())
            .finish_non_exhaustive()
    }
}

impl Binding {
    fn from_route(route: Route) -> Self {
        Self {
            verb: route.verb(),
            path: route.path().to_owned(),
            alias: route.alias().to_owned(),
            middlewares: route.config().middlewares().to_vec(),
            handler: Arc::clone(route.handler()),
        }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The path as it was declared, before conversion to the matcher syntax.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn middlewares(&self) -> &[SharedMiddleware] {
        &self.middlewares
    }

    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }
}

impl Debug for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("verb", &self.verb)
            .field("path", &self.path)
            .field("alias", &self.alias)
            .field("middlewares", &self.middlewares.len())
            .finish_non_exhaustive()
    }
}

impl<'table> RouteMatch<'table> {
    fn empty() -> Self {
        Self { bindings: &[], params: PathParams::empty() }
    }

    /// Returns true if no routes were matched
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    pub fn bindings(&self) -> &'table [Binding] {
        self.bindings
    }
}

impl Debug for RouteMatch<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteMatch").field("bindings", &self.bindings).field("params", &self.params).finish()
    }
}

#[derive(Default)]
pub struct RouteTableBuilder {
    default_handler: Option<SharedHandler>,
    extensions: Extensions,
}

impl RouteTableBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Serves requests no route matched.
    #[must_use]
    pub fn default_handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.default_handler = Some(Arc::new(handler));
        self
    }

    /// A value cloned into the extensions of every dispatched request.
    #[must_use]
    pub fn extension<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.extensions.insert(value);
        self
    }

    /// Binds the routes in registration order.
    pub fn bind(self, routes: RouteList) -> Result<RouteTable, BindError> {
        let mut data: Vec<(String, Vec<Binding>)> = Vec::new();
        let mut aliases = HashMap::new();

        for route in routes {
            let matcher_path = to_matcher_path(route.path());
            info!(verb = %route.verb(), path = route.path(), alias = route.alias(), "bind route");

            if !route.alias().is_empty() {
                aliases.entry(route.alias().to_owned()).or_insert_with(|| route.path().to_owned());
            }

            let binding = Binding::from_route(route);
            match data.iter_mut().find(|(path, _)| *path == matcher_path) {
                Some((_, bindings)) => bindings.push(binding),
                None => data.push((matcher_path, vec![binding])),
            }
        }

        let mut inner_router = InnerRouter::new();
        for (path, bindings) in data {
            inner_router.insert(path.as_str(), bindings).map_err(|e| BindError::invalid_path(&path, e))?;
        }

        Ok(RouteTable { inner_router, aliases, default_handler: self.default_handler, extensions: self.extensions })
    }
}

impl Debug for RouteTableBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTableBuilder")
            .field("default_handler", &self.default_handler.is_some())
            .finish_non_exhaustive()
    }
}

/// Converts `:name` segments to `{name}`, making sure the path starts with a separator.
fn to_matcher_path(path: &str) -> String {
    let converted = path
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => format!("{{{name}}}"),
            _ => segment.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("/");

    if converted.starts_with('/') { converted } else { format!("/{converted}") }
}
