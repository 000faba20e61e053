use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_test::create_test;
use super::handlers::delete_test::delete_test;
use super::handlers::delete_user::delete_user;
use super::handlers::get_me::get_me;
use super::handlers::get_test::get_test;
use super::handlers::list_tests::list_tests;
use super::handlers::refresh::refresh;
use super::handlers::sign_in::sign_in;
use super::handlers::sign_up::sign_up;
use super::handlers::update_test::update_test;
use super::middleware::authenticate as auth_middleware;
use crate::domain::test::ports::TestServicePort;
use crate::domain::user::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub test_service: Arc<dyn TestServicePort>,
    pub settings: HttpSettings,
}

/// Transport settings shared by all handlers.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Mark session cookies `Secure`
    pub secure_cookies: bool,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            secure_cookies: false,
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    test_service: Arc<dyn TestServicePort>,
    settings: HttpSettings,
) -> Router {
    let request_timeout = settings.request_timeout;
    let state = AppState {
        auth_service,
        test_service,
        settings,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/sign-up", post(sign_up))
        .route("/api/v1/auth/sign-in", post(sign_in))
        .route("/api/v1/auth/refresh", get(refresh));

    let protected_routes = Router::new()
        .route("/api/v1/users/me", get(get_me))
        .route("/api/v1/users/:user_id", delete(delete_user))
        .route("/api/v1/tests", post(create_test).get(list_tests))
        .route(
            "/api/v1/tests/:test_id",
            get(get_test).put(update_test).delete(delete_test),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
