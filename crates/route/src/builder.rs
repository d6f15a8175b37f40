//! The routing DSL.
//!
//! # Example
//! ```
//! use micro_route::{ConfigFragment, Controller, Registry, RouteBuilder, RouteError};
//! use micro_route::{BoxError, Request, Response};
//!
//! async fn list(_req: Request) -> Result<Response, BoxError> {
//!     Ok(Response::default())
//! }
//!
//! # fn main() -> Result<(), RouteError> {
//! let registry = Registry::builder()
//!     .controller(Controller::builder("UserController").static_fn("index", list).static_fn("list", list).build())
//!     .build();
//!
//! let mut builder = RouteBuilder::new(registry);
//! builder.group_with("/api", ConfigFragment::new().alias("api."), |r| {
//!     r.get("/users", "UserController.list")?;
//!     r.resource("/accounts", "UserController")?;
//!     Ok(())
//! })?;
//!
//! let routes = builder.into_routes();
//! assert_eq!(routes.len(), 2);
//! assert_eq!(routes.as_slice()[0].path(), "/api/users");
//! assert_eq!(routes.as_slice()[1].alias(), "api.api/accounts.index");
//! # Ok(())
//! # }
//! ```

use crate::config::{ConfigFragment, ConfigStack, EffectiveConfig};
use crate::error::{BuilderError, RouteError};
use crate::handler::{FnHandler, RequestHandler, SharedHandler};
use crate::path;
use crate::resolve::{resolve_handler, HandlerTarget, Resolver};
use crate::resource::{self, RESOURCE_ACTIONS};
use crate::route::{Route, RouteList, Verb};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, trace};

/// The last arguments of a verb call.
#[derive(Debug, Clone)]
pub enum Endpoint {
    /// `(uri, handler)`
    Target(HandlerTarget),
    /// `(uri, config, handler)`; a config with no handler is rejected
    Configured(ConfigFragment, Option<HandlerTarget>),
}

impl From<HandlerTarget> for Endpoint {
    fn from(target: HandlerTarget) -> Self {
        Self::Target(target)
    }
}

impl From<&str> for Endpoint {
    fn from(reference: &str) -> Self {
        Self::Target(reference.into())
    }
}

impl From<String> for Endpoint {
    fn from(reference: String) -> Self {
        Self::Target(reference.into())
    }
}

impl From<SharedHandler> for Endpoint {
    fn from(handler: SharedHandler) -> Self {
        Self::Target(handler.into())
    }
}

impl<F> From<FnHandler<F>> for Endpoint
where
    FnHandler<F>: RequestHandler + 'static,
{
    fn from(handler: FnHandler<F>) -> Self {
        Self::Target(handler.into())
    }
}

impl From<ConfigFragment> for Endpoint {
    fn from(config: ConfigFragment) -> Self {
        Self::Configured(config, None)
    }
}

impl<T: Into<HandlerTarget>> From<(ConfigFragment, T)> for Endpoint {
    fn from((config, target): (ConfigFragment, T)) -> Self {
        Self::Configured(config, Some(target.into()))
    }
}

/// The last arguments of a resource call.
#[derive(Debug, Clone)]
pub enum ResourceTarget {
    /// `(prefix, controller)`
    Controller(String),
    /// `(prefix, config, controller)`; a config with no controller is rejected
    Configured(ConfigFragment, Option<String>),
}

impl From<&str> for ResourceTarget {
    fn from(controller: &str) -> Self {
        Self::Controller(controller.to_owned())
    }
}

impl From<String> for ResourceTarget {
    fn from(controller: String) -> Self {
        Self::Controller(controller)
    }
}

impl From<ConfigFragment> for ResourceTarget {
    fn from(config: ConfigFragment) -> Self {
        Self::Configured(config, None)
    }
}

impl<S: Into<String>> From<(ConfigFragment, S)> for ResourceTarget {
    fn from((config, controller): (ConfigFragment, S)) -> Self {
        Self::Configured(config, Some(controller.into()))
    }
}

/// The scope state a `group` or `resource` call puts back when it is done.
struct Scope {
    prefix: String,
    stack: ConfigStack,
}

/// Collects routes declared through verb, group and resource calls.
///
/// Nested `group`/`resource` calls extend the prefix and the [`ConfigStack`] for the duration of
/// their composer and restore both afterwards, whether the composer succeeded or not.
pub struct RouteBuilder {
    resolver: Arc<dyn Resolver>,
    prefix: String,
    stack: ConfigStack,
    routes: RouteList,
}

macro_rules! verb_method {
    ($(#[$doc:meta])* $method:ident, $verb:expr) => {
        $(#[$doc])*
        pub fn $method(&mut self, uri: &str, endpoint: impl Into<Endpoint>) -> Result<&mut Self, RouteError> {
            self.register($verb, uri, endpoint.into())
        }
    };
}

impl RouteBuilder {
    pub fn builder() -> RouteBuilderBuilder {
        RouteBuilderBuilder::new()
    }

    /// Creates a builder with an empty prefix.
    pub fn new(resolver: impl Resolver + 'static) -> Self {
        Self::with_resolver(Arc::new(resolver), String::new())
    }

    fn with_resolver(resolver: Arc<dyn Resolver>, prefix: String) -> Self {
        Self { resolver, prefix, stack: ConfigStack::new(), routes: RouteList::new() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn config_stack(&self) -> &ConfigStack {
        &self.stack
    }

    /// The configuration a route registered here without its own fragment would get.
    pub fn effective_config(&self) -> Result<EffectiveConfig, RouteError> {
        self.stack.merge(self.resolver.as_ref())
    }

    pub fn routes(&self) -> &RouteList {
        &self.routes
    }

    pub fn into_routes(self) -> RouteList {
        self.routes
    }

    verb_method!(get, Verb::Get);
    verb_method!(head, Verb::Head);
    verb_method!(post, Verb::Post);
    verb_method!(put, Verb::Put);
    verb_method!(patch, Verb::Patch);
    verb_method!(delete, Verb::Delete);
    verb_method!(
        /// Registers a route matching every method.
        all,
        Verb::All
    );

    /// Groups routes under `prefix`; the composer sees the extended prefix.
    pub fn group<F>(&mut self, prefix: &str, composer: F) -> Result<&mut Self, RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        self.scoped(prefix, Some(ConfigFragment::new()), composer)?;
        Ok(self)
    }

    /// Groups routes under `prefix`, pushing `config` for every route declared in the composer.
    pub fn group_with<F>(&mut self, prefix: &str, config: ConfigFragment, composer: F) -> Result<&mut Self, RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        self.scoped(prefix, Some(config), composer)?;
        Ok(self)
    }

    /// Registers the conventional CRUD routes the controller supports.
    pub fn resource(&mut self, prefix: &str, target: impl Into<ResourceTarget>) -> Result<&mut Self, RouteError> {
        self.resource_scope(prefix, target.into(), None::<fn(&mut Self) -> Result<(), RouteError>>)
    }

    /// Like [`RouteBuilder::resource`], then runs `extra` inside the resource scope.
    pub fn resource_then<F>(
        &mut self,
        prefix: &str,
        target: impl Into<ResourceTarget>,
        extra: F,
    ) -> Result<&mut Self, RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        self.resource_scope(prefix, target.into(), Some(extra))
    }

    fn resource_scope<F>(
        &mut self,
        prefix: &str,
        target: ResourceTarget,
        extra: Option<F>,
    ) -> Result<&mut Self, RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        let (config, controller) = match target {
            ResourceTarget::Controller(controller) => (None, controller),
            ResourceTarget::Configured(config, Some(controller)) => (Some(config), controller),
            ResourceTarget::Configured(_, None) => {
                return Err(RouteError::invalid_argument("resource config must be followed by a controller name"));
            }
        };

        self.scoped(prefix, config, |builder| {
            builder.expand_resource(&controller)?;
            match extra {
                Some(extra) => extra(builder),
                None => Ok(()),
            }
        })?;
        Ok(self)
    }

    fn expand_resource(&mut self, controller_name: &str) -> Result<(), RouteError> {
        let controller = self.resolver.controller(controller_name)?;
        let id_param = resource::id_param(&self.prefix);

        for action in RESOURCE_ACTIONS.iter().filter(|action| controller.supports(action.member())) {
            let handler = controller
                .bind(action.member())
                .ok_or_else(|| RouteError::member_not_found(controller_name, action.member()))?;
            let config = self.stack.push(ConfigFragment::new().alias(action.alias(&self.prefix)));
            let path = action.path(&self.prefix, &id_param);
            self.add_route(action.verb(), path, handler, &config)?;
        }
        Ok(())
    }

    fn register(&mut self, verb: Verb, uri: &str, endpoint: Endpoint) -> Result<&mut Self, RouteError> {
        let (stack, target) = match endpoint {
            Endpoint::Target(target) => (self.stack.clone(), target),
            Endpoint::Configured(config, Some(target)) => (self.stack.push(config), target),
            Endpoint::Configured(_, None) => {
                return Err(RouteError::invalid_argument(format!(
                    "{verb} {uri}: config must be followed by a handler or a handler reference"
                )));
            }
        };

        let handler = resolve_handler(self.resolver.as_ref(), &target)?;
        let path = path::join(&self.prefix, uri);
        self.add_route(verb, path, handler, &stack)?;
        Ok(self)
    }

    fn add_route(
        &mut self,
        verb: Verb,
        path: String,
        handler: SharedHandler,
        stack: &ConfigStack,
    ) -> Result<(), RouteError> {
        let config = stack.merge(self.resolver.as_ref())?;
        debug!(
            %verb,
            path = path.as_str(),
            alias = config.alias(),
            middlewares = config.middlewares().len(),
            "route registered"
        );
        self.routes.push(Route::new(verb, path, handler, config));
        Ok(())
    }

    /// Runs `composer` with `segment` appended to the prefix and `fragment` pushed on the stack.
    ///
    /// The previous prefix and stack are put back before returning, on success and on error.
    fn scoped<F>(&mut self, segment: &str, fragment: Option<ConfigFragment>, composer: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        let saved = self.enter(segment, fragment);
        let result = composer(self);
        self.leave(saved);
        result
    }

    fn enter(&mut self, segment: &str, fragment: Option<ConfigFragment>) -> Scope {
        let prefix = format!("{}{segment}", self.prefix);
        let stack = match fragment {
            Some(fragment) => self.stack.push(fragment),
            None => self.stack.clone(),
        };
        trace!(prefix = prefix.as_str(), depth = stack.len(), "entering scope");

        Scope { prefix: std::mem::replace(&mut self.prefix, prefix), stack: std::mem::replace(&mut self.stack, stack) }
    }

    fn leave(&mut self, saved: Scope) {
        trace!(prefix = saved.prefix.as_str(), depth = saved.stack.len(), "leaving scope");
        self.prefix = saved.prefix;
        self.stack = saved.stack;
    }
}

impl Debug for RouteBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteBuilder")
            .field("prefix", &self.prefix)
            .field("stack", &self.stack)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

/// Configures a [`RouteBuilder`].
#[derive(Default)]
pub struct RouteBuilderBuilder {
    resolver: Option<Arc<dyn Resolver>>,
    prefix: String,
}

impl RouteBuilderBuilder {
    fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    #[must_use]
    pub fn shared_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// The prefix every route of the builder starts with.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn build(self) -> Result<RouteBuilder, BuilderError> {
        let resolver = self.resolver.ok_or(BuilderError::MissingResolver)?;
        Ok(RouteBuilder::with_resolver(resolver, self.prefix))
    }
}

impl Debug for RouteBuilderBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteBuilderBuilder")
            .field("resolver", &self.resolver.is_some())
            .field("prefix", &self.prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RouteBuilder;
    use crate::config::{ConfigFragment, MiddlewareRef};
    use crate::error::{BuilderError, RouteError};
    use crate::handler::{handler_fn, BoxError, Request, Response};
    use crate::middleware::{Middleware, Next};
    use crate::module::{Controller, MiddlewareModule};
    use crate::resolve::{MockResolver, Registry};
    use crate::route::{Route, Verb};
    use async_trait::async_trait;
    use bytes::Bytes;
    use http::HeaderValue;
    use mockall::predicate::eq;
    use std::future::{ready, Ready};
    use std::sync::Arc;

    fn reply(body: &'static str) -> impl Fn(Request) -> Ready<Result<Response, BoxError>> + Send + Sync + 'static {
        move |_req: Request| ready(Ok::<_, BoxError>(Response::new(Bytes::from_static(body.as_bytes()))))
    }

    struct Tag(&'static str);

    #[async_trait]
    impl Middleware for Tag {
        async fn handle(&self, mut req: Request, next: Next<'_>) -> Result<Response, BoxError> {
            req.headers_mut().append("x-trail", HeaderValue::from_static(self.0));
            next.run(req).await
        }
    }

    fn full_controller() -> Controller {
        ["index", "create", "store", "show", "edit", "update", "destroy"]
            .into_iter()
            .fold(Controller::builder("FullController"), |builder, member| builder.static_fn(member, reply(member)))
            .build()
    }

    fn photo_controller() -> Controller {
        Controller::builder("PhotoController")
            .static_fn("index", reply("PhotoController.index"))
            .static_fn("show", reply("PhotoController.show"))
            .build()
    }

    fn registry() -> Registry {
        Registry::builder()
            .controller(
                Controller::builder("UserController")
                    .static_fn("list", reply("UserController.list"))
                    .static_fn("store", reply("UserController.store"))
                    .build(),
            )
            .controller(full_controller())
            .controller(photo_controller())
            .middleware(MiddlewareModule::builder("Auth").static_handle(Tag("auth")).build())
            .middleware(MiddlewareModule::builder("Log").static_handle(Tag("log")).build())
            .build()
    }

    fn summary(routes: &[Route]) -> Vec<(Verb, &str, &str)> {
        routes.iter().map(|route| (route.verb(), route.path(), route.alias())).collect()
    }

    async fn call(route: &Route) -> String {
        let endpoint = Arc::clone(route.handler());
        let middlewares = route.config().middlewares();
        let resp = Next::new(middlewares, endpoint.as_ref()).run(Request::new(Bytes::new())).await.unwrap();
        String::from_utf8(resp.into_body().to_vec()).unwrap()
    }

    fn trail_handler() -> impl Fn(Request) -> Ready<Result<Response, BoxError>> + Send + Sync + 'static {
        |req: Request| {
            let trail = req.headers().get_all("x-trail").iter().map(|v| v.to_str().unwrap()).collect::<Vec<_>>();
            ready(Ok::<_, BoxError>(Response::new(Bytes::from(trail.join(",")))))
        }
    }

    #[tokio::test]
    async fn test_group_end_to_end() {
        let mut builder = RouteBuilder::new(registry());
        builder
            .group("/api", |r| {
                r.get("/users", "UserController.list")?;
                Ok(())
            })
            .unwrap();

        let routes = builder.into_routes();
        assert_eq!(routes.len(), 1);

        let route = &routes.as_slice()[0];
        assert_eq!(route.verb(), Verb::Get);
        assert_eq!(route.path(), "/api/users");
        assert_eq!(call(route).await, "UserController.list");
    }

    #[test]
    fn test_every_verb() {
        let mut builder = RouteBuilder::new(registry());
        builder
            .get("/r", "UserController.list")
            .and_then(|r| r.head("/r", "UserController.list"))
            .and_then(|r| r.post("/r", "UserController.store"))
            .and_then(|r| r.put("/r", "UserController.store"))
            .and_then(|r| r.patch("/r", "UserController.store"))
            .and_then(|r| r.delete("/r", "UserController.store"))
            .and_then(|r| r.all("/r", handler_fn(reply("any"))))
            .unwrap();

        let verbs = builder.routes().iter().map(Route::verb).collect::<Vec<_>>();
        assert_eq!(verbs, [Verb::Get, Verb::Head, Verb::Post, Verb::Put, Verb::Patch, Verb::Delete, Verb::All]);
    }

    #[test]
    fn test_nested_groups_restore_scope() {
        let mut builder = RouteBuilder::new(registry());
        builder
            .group_with("/api", ConfigFragment::new().alias("api.").middleware("Log"), |r| {
                r.group("/v1", |r| {
                    assert_eq!(r.prefix(), "/api/v1");
                    assert_eq!(r.config_stack().len(), 2);
                    r.get("/users", "UserController.list")?;
                    Ok(())
                })?;
                assert_eq!(r.prefix(), "/api");
                assert_eq!(r.config_stack().len(), 1);
                r.get("/status", "UserController.list")?;
                Ok(())
            })
            .unwrap();

        assert_eq!(builder.prefix(), "");
        assert!(builder.config_stack().is_empty());
        assert_eq!(builder.effective_config().unwrap().alias(), "");

        let routes = builder.routes().as_slice();
        assert_eq!(summary(routes), [(Verb::Get, "/api/v1/users", ""), (Verb::Get, "/api/status", "api.")]);
        assert_eq!(routes[0].config().middlewares().len(), 1);
        assert_eq!(routes[1].config().middlewares().len(), 1);
    }

    #[test]
    fn test_failed_group_restores_scope() {
        let mut builder = RouteBuilder::builder().resolver(registry()).prefix("/root").build().unwrap();

        builder
            .group_with("/outer", ConfigFragment::new().alias("outer."), |r| {
                let stack_before = r.config_stack().clone();

                let err = r
                    .group_with("/inner", ConfigFragment::new().alias("inner."), |r| {
                        r.get("/ok", "UserController.list")?;
                        r.get("/broken", "MissingController.index")?;
                        Ok(())
                    })
                    .unwrap_err();
                assert!(matches!(err, RouteError::Resolution { .. }));

                assert_eq!(r.prefix(), "/root/outer");
                assert_eq!(r.config_stack(), &stack_before);

                r.get("/after", (ConfigFragment::new().alias("after"), "UserController.list"))?;
                Ok(())
            })
            .unwrap();

        assert_eq!(builder.prefix(), "/root");
        assert!(builder.config_stack().is_empty());
        assert_eq!(
            summary(builder.routes().as_slice()),
            [(Verb::Get, "/root/outer/inner/ok", "outer.inner."), (Verb::Get, "/root/outer/after", "outer.after")]
        );
    }

    #[test]
    fn test_composer_error_propagates() {
        let mut builder = RouteBuilder::new(registry());
        let err = builder.group("/api", |_r| Err(RouteError::invalid_argument("stop"))).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: stop");
        assert_eq!(builder.prefix(), "");
        assert!(builder.config_stack().is_empty());
    }

    #[test]
    fn test_alias_override_rule() {
        let mut builder = RouteBuilder::new(registry());
        builder
            .group_with("", ConfigFragment::new().alias("a"), |r| {
                r.group_with("", ConfigFragment::new().alias("b"), |r| {
                    r.get("/plain", "UserController.list")?;
                    r.get("/no-alias", (ConfigFragment::new().middleware("Auth"), "UserController.list"))?;
                    r.get("/named", (ConfigFragment::new().alias("c"), "UserController.list"))?;
                    Ok(())
                })?;
                // a composer-only group contributes a fragment without an alias
                r.group("/bare", |r| {
                    r.get("/x", "UserController.list")?;
                    Ok(())
                })?;
                Ok(())
            })
            .unwrap();

        assert_eq!(
            summary(builder.routes().as_slice()),
            [
                (Verb::Get, "/plain", "ab"),
                (Verb::Get, "/no-alias", ""),
                (Verb::Get, "/named", "abc"),
                (Verb::Get, "/bare/x", ""),
            ]
        );
    }

    #[tokio::test]
    async fn test_middlewares_outer_scope_first() {
        let mut builder = RouteBuilder::new(registry());
        builder
            .group_with("/api", ConfigFragment::new().middleware("Log"), |r| {
                let config = ConfigFragment::new().middlewares(["Auth".into(), MiddlewareRef::inline(Tag("inline"))]);
                r.get("/trail", (config, handler_fn(trail_handler())))?;
                Ok(())
            })
            .unwrap();

        let route = &builder.routes().as_slice()[0];
        assert_eq!(call(route).await, "log,auth,inline");
    }

    #[test]
    fn test_path_separators_collapse() {
        let mut builder = RouteBuilder::new(registry());
        builder
            .group("/api/", |r| {
                r.group("//v1/", |r| {
                    r.get("//users//", "UserController.list")?;
                    Ok(())
                })?;
                Ok(())
            })
            .unwrap();

        assert_eq!(builder.routes().as_slice()[0].path(), "/api/v1/users/");
    }

    #[test]
    fn test_resource_expansion() {
        let mut builder = RouteBuilder::new(registry());
        builder.resource("/album/:id/photo", "FullController").unwrap();

        assert_eq!(
            summary(builder.routes().as_slice()),
            [
                (Verb::Get, "/album/:id/photo", "album/:id/photo.index"),
                (Verb::Post, "/album/:id/photo/create", "album/:id/photo.create"),
                (Verb::Post, "/album/:id/photo", "album/:id/photo.store"),
                (Verb::Get, "/album/:id/photo/:album_id_photo_id", "album/:id/photo.show"),
                (Verb::Get, "/album/:id/photo/:album_id_photo_id/edit", "album/:id/photo.edit"),
                (Verb::Patch, "/album/:id/photo/:album_id_photo_id", "album/:id/photo.update"),
                (Verb::Delete, "/album/:id/photo/:album_id_photo_id", "album/:id/photo.destroy"),
            ]
        );
    }

    #[tokio::test]
    async fn test_root_resource_uses_generic_id() {
        let mut builder = RouteBuilder::new(registry());
        builder.resource("/", "FullController").unwrap();

        let routes = builder.routes().as_slice();
        assert_eq!(routes.len(), 7);
        assert_eq!(routes[0].path(), "/");
        assert_eq!(routes[3].path(), "/:id");
        assert_eq!(routes[4].path(), "/:id/edit");
        assert_eq!(routes[3].alias(), ".show");
        assert_eq!(call(&routes[6]).await, "destroy");
    }

    #[test]
    fn test_resource_skips_missing_members() {
        let mut builder = RouteBuilder::new(registry());
        builder.resource("/photo", "PhotoController").unwrap();

        assert_eq!(
            summary(builder.routes().as_slice()),
            [(Verb::Get, "/photo", "photo.index"), (Verb::Get, "/photo/:photo_id", "photo.show")]
        );
    }

    #[test]
    fn test_resource_with_config_and_extra_routes() {
        let mut builder = RouteBuilder::new(registry());
        builder
            .resource_then(
                "/photo",
                (ConfigFragment::new().alias("admin.").middleware("Auth"), "PhotoController"),
                |r| {
                    assert_eq!(r.prefix(), "/photo");
                    assert_eq!(r.config_stack().len(), 1);
                    r.get("/search", "UserController.list")?;
                    Ok(())
                },
            )
            .unwrap();

        let routes = builder.routes().as_slice();
        assert_eq!(
            summary(routes),
            [
                (Verb::Get, "/photo", "admin.photo.index"),
                (Verb::Get, "/photo/:photo_id", "admin.photo.show"),
                (Verb::Get, "/photo/search", "admin."),
            ]
        );
        assert!(routes.iter().all(|route| route.config().middlewares().len() == 1));
        assert_eq!(builder.prefix(), "");
        assert!(builder.config_stack().is_empty());
    }

    #[test]
    fn test_resource_inside_group() {
        let mut builder = RouteBuilder::new(registry());
        builder
            .group_with("/admin", ConfigFragment::new().alias("admin::"), |r| {
                r.resource_then("/users", "PhotoController", |r| {
                    // the controller-name form pushes no fragment of its own
                    assert_eq!(r.config_stack().len(), 1);
                    r.post("", "UserController.store")?;
                    Ok(())
                })?;
                Ok(())
            })
            .unwrap();

        assert_eq!(
            summary(builder.routes().as_slice()),
            [
                (Verb::Get, "/admin/users", "admin::admin/users.index"),
                (Verb::Get, "/admin/users/:admin_users_id", "admin::admin/users.show"),
                (Verb::Post, "/admin/users", "admin::"),
            ]
        );
    }

    #[test]
    fn test_resource_unknown_controller_restores_scope() {
        let mut builder = RouteBuilder::new(registry());
        let err = builder.resource("/ghost", (ConfigFragment::new().alias("g."), "GhostController")).unwrap_err();

        assert!(matches!(err, RouteError::Resolution { .. }));
        assert_eq!(builder.prefix(), "");
        assert!(builder.config_stack().is_empty());
        assert!(builder.routes().is_empty());
    }

    #[test]
    fn test_invalid_argument_shapes() {
        let mut builder = RouteBuilder::new(registry());

        let err = builder.get("/users", ConfigFragment::new().alias("users")).unwrap_err();
        assert!(matches!(err, RouteError::InvalidArgument { .. }));

        let err = builder.resource("/users", ConfigFragment::new()).unwrap_err();
        assert!(matches!(err, RouteError::InvalidArgument { .. }));

        assert!(builder.routes().is_empty());
        assert_eq!(builder.prefix(), "");
    }

    #[test]
    fn test_reference_errors() {
        let mut builder = RouteBuilder::new(registry());

        let err = builder.get("/users", "UserController").unwrap_err();
        assert!(matches!(err, RouteError::MalformedReference { .. }));

        let err = builder.get("/users", "UserController.destroy").unwrap_err();
        assert!(matches!(err, RouteError::MemberNotFound { .. }));

        let err =
            builder.get("/users", (ConfigFragment::new().middleware("Missing"), "UserController.list")).unwrap_err();
        assert!(matches!(err, RouteError::Resolution { .. }));
        assert!(builder.routes().is_empty());
    }

    #[test]
    fn test_builder_configuration() {
        let err = RouteBuilder::builder().prefix("/v1").build().unwrap_err();
        assert!(matches!(err, BuilderError::MissingResolver));

        let mut builder = RouteBuilder::builder().resolver(registry()).prefix("/v1").build().unwrap();
        builder.get("/users", "UserController.list").unwrap();
        assert_eq!(builder.routes().as_slice()[0].path(), "/v1/users");
    }

    #[test]
    fn test_resource_through_mock_resolver() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_controller()
            .with(eq("PhotoController"))
            .times(1)
            .returning(|_| Ok(Arc::new(photo_controller())));
        resolver.expect_middleware().never();

        let mut builder = RouteBuilder::new(resolver);
        builder.resource("/photo", "PhotoController").unwrap();
        assert_eq!(builder.routes().len(), 2);
    }
}
