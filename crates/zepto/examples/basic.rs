//! Minimal HTTP server backed by a zepto router.
//!
//! Run with:
//! ```bash
//! cargo run -p zepto --example basic
//! ```
//!
//! Then try:
//! ```bash
//! curl http://127.0.0.1:3000/hello/42
//! curl http://127.0.0.1:3000/api/users
//! curl -H 'Authorization: Bearer demo' 'http://127.0.0.1:3000/api/users?limit=1'
//! curl -H 'Authorization: Bearer demo' http://127.0.0.1:3000/api/users
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;

use clap::Parser;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request as HyperRequest, Response as HyperResponse, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use zepto::{from_fn, Handler, HandlerResult, Logger, Method, Request, Response, RouteGroup, Router};

/// Serve a small demo API.
#[derive(Parser)]
#[command(name = "zepto-basic")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(short, long, env = "ZEPTO_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Enable debug logging (route registration and misses).
    #[arg(short, long)]
    verbose: bool,
}

async fn hello(req: Request) -> HandlerResult {
    Response::json(200, &json!({ "message": format!("Hello, {}!", req.param("id")) }))
}

async fn list_users(req: Request) -> HandlerResult {
    let users = [json!({ "id": 1, "name": "alice" }), json!({ "id": 2, "name": "bob" })];
    let limit = req
        .get_query("limit")
        .and_then(|limit| limit.parse().ok())
        .unwrap_or(users.len());
    Response::json(200, &users[..limit.min(users.len())])
}

async fn get_user(req: Request) -> HandlerResult {
    let Some(id) = req.params.parse::<u64>("id") else {
        return Response::json(400, &json!({ "error": "id must be a number" }));
    };
    Response::json(200, &json!({ "id": id }))
}

fn build_router() -> zepto::Result<Router> {
    let auth = from_fn(|req: Request, next: Handler| async move {
        if req.get_header("Authorization").is_none() {
            return Response::json(401, &json!({ "error": "Unauthorized" }));
        }
        next(req).await
    });

    let api = RouteGroup::new("/api")
        .middleware(auth)
        .get("/users", list_users)
        .get("/users/:id", get_user);

    Ok(Router::builder()
        .middleware(Logger)
        .get("/", |_req: Request| async { Ok(Response::text("zepto")) })?
        .get("/hello/:id", hello)?
        .group(api)?
        .build())
}

async fn handle_request(
    req: HyperRequest<hyper::body::Incoming>,
    router: Router,
) -> Result<HyperResponse<Full<Bytes>>, Infallible> {
    let Some(method) = Method::parse(req.method().as_str()) else {
        return Ok(plain(StatusCode::METHOD_NOT_ALLOWED));
    };

    let uri = req.uri();
    let mut request = Request::new(method, uri.path());
    if let Some(query) = uri.query() {
        request.query = Request::parse_query_string(query);
    }
    for (key, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            request.headers.insert(key.to_string(), value.to_string());
        }
    }
    request.body = match req.collect().await {
        Ok(collected) => collected.to_bytes().to_vec(),
        Err(_) => return Ok(plain(StatusCode::BAD_REQUEST)),
    };

    let response = router.handle(request).await;

    let mut builder = HyperResponse::builder().status(
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    );
    for (key, value) in &response.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    Ok(builder
        .body(Full::new(Bytes::from(response.body)))
        .unwrap_or_else(|_| plain(StatusCode::INTERNAL_SERVER_ERROR)))
}

fn plain(status: StatusCode) -> HyperResponse<Full<Bytes>> {
    let mut response = HyperResponse::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let router = build_router()?;
    for (method, pattern) in router.routes() {
        info!(%method, %pattern, "route");
    }

    let listener = TcpListener::bind(cli.addr).await?;
    info!(addr = %cli.addr, "listening");

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let router = router.clone();

        tokio::task::spawn(async move {
            let service = service_fn(move |req| handle_request(req, router.clone()));
            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                error!(error = %err, "error serving connection");
            }
        });
    }
}
