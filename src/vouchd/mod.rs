use crate::cli::globals::GlobalArgs;
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Method, Request},
    routing::post,
    Extension, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

pub mod handlers;

/// Build the router. Split out from [`new`] so tests can drive it without a
/// listener.
#[must_use]
pub fn app(globals: GlobalArgs) -> Router {
    // The calling application may live on any origin
    let cors = CorsLayer::new()
        .allow_methods([Method::POST])
        .allow_origin(Any);

    Router::new().route("/auth", post(handlers::auth)).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(cors)
            .layer(Extension(globals)),
    )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, globals: &GlobalArgs) -> Result<()> {
    let ipaddr = if globals.localhost_only {
        "127.0.0.1"
    } else {
        "0.0.0.0"
    };

    let listener = TcpListener::bind(format!("{ipaddr}:{port}")).await?;

    info!(
        "{} {} listening on {}:{}",
        crate::APP_USER_AGENT,
        crate::GIT_COMMIT_HASH,
        ipaddr,
        port
    );

    axum::serve(listener, app(globals.clone()).into_make_service()).await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
