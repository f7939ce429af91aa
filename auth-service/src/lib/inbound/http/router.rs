use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::generate_api_key::generate_api_key;
use super::handlers::get_user_info::get_user_info;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::handlers::token_login::token_login;
use super::middleware::require_auth;
use super::middleware::ApiKeyAuth;
use super::middleware::BasicAuth;
use super::middleware::SessionAuth;
use super::middleware::TokenAuth;
use crate::domain::auth::service::AuthService;
use crate::domain::auth::token::TokenService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::PostgresAuthRepository;
use crate::outbound::repositories::PostgresUserRepository;
use crate::outbound::session::PostgresSessionStore;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PostgresAuthRepository>>,
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub token_service: Arc<TokenService>,
    pub session_store: Arc<PostgresSessionStore>,
}

pub fn create_router(
    auth_service: Arc<AuthService<PostgresAuthRepository>>,
    user_service: Arc<UserService<PostgresUserRepository>>,
    token_service: Arc<TokenService>,
    session_store: Arc<PostgresSessionStore>,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        token_service,
        session_store,
    };

    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/token/login", post(token_login))
        .route("/auth/logout", post(logout))
        .route("/health", get(health));

    let session_routes = Router::new()
        .route("/auth/api-key", get(generate_api_key))
        .route("/user/session", get(get_user_info))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<SessionAuth>,
        ));

    // The same profile handler behind each remaining strategy; the handler
    // itself cannot tell which middleware verified the caller.
    let basic_routes = Router::new()
        .route("/user/basic", get(get_user_info))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<BasicAuth>,
        ));

    let token_routes = Router::new()
        .route("/user/token", get(get_user_info))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<TokenAuth>,
        ));

    let api_key_routes = Router::new()
        .route("/user/api-key", get(get_user_info))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<ApiKeyAuth>,
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
        .merge(session_routes)
        .merge(basic_routes)
        .merge(token_routes)
        .merge(api_key_routes)
        .layer(trace_layer)
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}
