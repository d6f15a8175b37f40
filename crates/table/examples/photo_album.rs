use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use micro_route::{
    handler_fn, BoxError, ConfigFragment, Controller, Middleware, MiddlewareModule, Next, Registry, Request, Response,
    RouteBuilder, RouteError, RouteList,
};
use micro_route_table::{PathParams, RouteTable};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Default)]
struct PhotoController;

impl PhotoController {
    async fn index(self: Arc<Self>, _req: Request) -> Result<Response, BoxError> {
        Ok(text("all photos"))
    }

    async fn show(self: Arc<Self>, req: Request) -> Result<Response, BoxError> {
        let params = req.extensions().get::<PathParams>().cloned().unwrap_or_default();
        let album = params.get("id").unwrap_or("?");
        let photo = params.get("album_id_photo_id").unwrap_or("?");
        Ok(text(&format!("photo {photo} of album {album}")))
    }
}

#[derive(Default)]
struct Auth;

#[async_trait]
impl Middleware for Auth {
    async fn handle(&self, req: Request, next: Next<'_>) -> Result<Response, BoxError> {
        if req.headers().contains_key(http::header::AUTHORIZATION) {
            return next.run(req).await;
        }
        let mut resp = text("login first");
        *resp.status_mut() = StatusCode::UNAUTHORIZED;
        Ok(resp)
    }
}

struct AccessLog;

#[async_trait]
impl Middleware for AccessLog {
    async fn handle(&self, req: Request, next: Next<'_>) -> Result<Response, BoxError> {
        let (method, path) = (req.method().clone(), req.uri().path().to_owned());
        let resp = next.run(req).await?;
        info!(%method, path = path.as_str(), status = resp.status().as_u16(), "access");
        Ok(resp)
    }
}

fn text(body: &str) -> Response {
    Response::new(Bytes::from(body.to_owned()))
}

async fn status(_req: Request) -> Result<Response, BoxError> {
    Ok(text("ok"))
}

async fn not_found(_req: Request) -> Result<Response, BoxError> {
    let mut resp = text("404 not found");
    *resp.status_mut() = StatusCode::NOT_FOUND;
    Ok(resp)
}

fn declare_routes() -> Result<RouteList, RouteError> {
    let registry = Registry::builder()
        .controller(
            Controller::builder("PhotoController")
                .method("index", PhotoController::index)
                .method("show", PhotoController::show)
                .build(),
        )
        .middleware(MiddlewareModule::builder("Auth").handle::<Auth>().build())
        .middleware(MiddlewareModule::builder("AccessLog").static_handle(AccessLog).build())
        .build();

    let mut builder = RouteBuilder::new(registry);
    builder.get("/status", handler_fn(status))?;
    builder.group_with("/album/:id", ConfigFragment::new().middlewares(["AccessLog", "Auth"]).alias("album."), |r| {
        r.resource("/photo", "PhotoController")?;
        Ok(())
    })?;
    Ok(builder.into_routes())
}

async fn call(table: &RouteTable, method: Method, path: &str, authorized: bool) {
    let mut builder = http::Request::builder().method(method).uri(path);
    if authorized {
        builder = builder.header(http::header::AUTHORIZATION, "Bearer demo");
    }
    let req = match builder.body(Bytes::new()) {
        Ok(req) => req,
        Err(e) => {
            error!(cause = %e, "invalid request");
            return;
        }
    };

    match table.dispatch(req).await {
        Ok(resp) => info!(path, status = resp.status().as_u16(), body = ?resp.body(), "dispatched"),
        Err(e) => error!(path, cause = %e, "dispatch failed"),
    }
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let routes = match declare_routes() {
        Ok(routes) => routes,
        Err(e) => {
            error!(cause = %e, "route declaration failed");
            return;
        }
    };

    match serde_json::to_string_pretty(&routes.describe()) {
        Ok(json) => println!("{json}"),
        Err(e) => error!(cause = %e, "describe routes failed"),
    }

    let table = match RouteTable::builder().default_handler(handler_fn(not_found)).bind(routes) {
        Ok(table) => table,
        Err(e) => {
            error!(cause = %e, "bind routes failed");
            return;
        }
    };

    call(&table, Method::GET, "/status", false).await;
    call(&table, Method::GET, "/album/3/photo", false).await;
    call(&table, Method::GET, "/album/3/photo", true).await;
    call(&table, Method::GET, "/album/3/photo/12", true).await;
    call(&table, Method::GET, "/nowhere", false).await;
}
