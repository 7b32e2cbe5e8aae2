#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use zepto::{from_fn, handler_fn, Handler, Middleware, Request, Response, Router, RouterBuilder};

pub type Trace = Arc<Mutex<Vec<String>>>;

/// Handler answering with `name` as a text body.
pub fn tag(name: &'static str) -> Handler {
    handler_fn(move |_req: Request| async move { Ok(Response::text(name)) })
}

/// Handler echoing its bound parameters as `name=value` pairs joined by `&`.
pub fn echo_params() -> Handler {
    handler_fn(|req: Request| async move {
        let pairs: Vec<String> = req
            .params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        Ok(Response::text(pairs.join("&")))
    })
}

/// Handler that records `H` into `trace` before answering.
pub fn traced(trace: &Trace) -> Handler {
    let trace = Arc::clone(trace);
    handler_fn(move |_req: Request| {
        let trace = Arc::clone(&trace);
        async move {
            trace.lock().unwrap().push("H".to_string());
            Ok(Response::ok())
        }
    })
}

/// Adapter recording `{name}-before` and `{name}-after` around the handler.
pub fn recorder(name: &'static str, trace: &Trace) -> impl Middleware {
    let trace = Arc::clone(trace);
    from_fn(move |req: Request, next: Handler| {
        let trace = Arc::clone(&trace);
        async move {
            trace.lock().unwrap().push(format!("{name}-before"));
            let res = next(req).await;
            trace.lock().unwrap().push(format!("{name}-after"));
            res
        }
    })
}

pub fn build(f: impl FnOnce(RouterBuilder) -> zepto::Result<RouterBuilder>) -> Router {
    f(Router::builder())
        .unwrap_or_else(|e| panic!("Failed to build router: {e}"))
        .build()
}

pub async fn body(router: &Router, request: Request) -> (u16, String) {
    let res = router.handle(request).await;
    let body = res.body_string().unwrap_or_default();
    (res.status, body)
}
