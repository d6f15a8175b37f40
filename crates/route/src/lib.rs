//! Declarative route registration.
//!
//! Routes are declared with per-verb calls, nested [`RouteBuilder::group`] scopes and
//! [`RouteBuilder::resource`] shorthand, then resolved into a flat [`RouteList`] ready to be
//! bound to a server.
//!
//! Each scope may contribute a [`ConfigFragment`] (middlewares and an alias). The fragments of
//! all enclosing scopes are folded into the [`EffectiveConfig`] of every route registered
//! inside them. Handler references such as `"UserController.index"` and named middlewares are
//! looked up through a [`Resolver`], e.g. the in-memory [`Registry`].

mod builder;
mod config;
mod error;
mod handler;
mod middleware;
mod module;
mod path;
mod resource;
mod route;

pub mod resolve;

pub use builder::Endpoint;
pub use builder::ResourceTarget;
pub use builder::RouteBuilder;
pub use builder::RouteBuilderBuilder;
pub use config::ConfigFragment;
pub use config::ConfigStack;
pub use config::EffectiveConfig;
pub use config::MiddlewareRef;
pub use config::MiddlewareSpec;
pub use error::BuilderError;
pub use error::RouteError;
pub use handler::handler_fn;
pub use handler::BoxError;
pub use handler::FnHandler;
pub use handler::Request;
pub use handler::RequestHandler;
pub use handler::Response;
pub use handler::SharedHandler;
pub use middleware::middleware_fn;
pub use middleware::FnMiddleware;
pub use middleware::Middleware;
pub use middleware::Next;
pub use middleware::SharedMiddleware;
pub use module::Controller;
pub use module::MemberKind;
pub use module::MiddlewareModule;
pub use module::Module;
pub use module::ModuleBuilder;
pub use module::MIDDLEWARE_ENTRY;
pub use path::collapse_separators;
pub use resolve::HandlerTarget;
pub use resolve::Registry;
pub use resolve::Resolver;
pub use resource::id_param;
pub use resource::ResourceAction;
pub use resource::RESOURCE_ACTIONS;
pub use route::Route;
pub use route::RouteInfo;
pub use route::RouteList;
pub use route::Verb;
