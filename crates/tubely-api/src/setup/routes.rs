//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::constants::API_PREFIX;
use crate::handlers;
use crate::middleware::hide_error_details;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::Config;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = AuthState {
        jwt_secret: config.jwt_secret().to_string(),
    };

    // Protected routes (require authentication)
    let protected_routes = protected_routes(config).layer(axum::middleware::from_fn_with_state(
        Arc::new(auth_state),
        auth_middleware,
    ));

    // Upload routes carry their own tighter RequestBodyLimitLayer. The extractor
    // default is disabled so body limits come from the limit layers alone.
    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(protected_routes)
        .with_state(state)
        .nest_service("/assets", ServeDir::new(config.assets_root()))
        .merge(RapiDoc::with_openapi("/api/openapi.json", ApiDoc::openapi()).path("/docs"))
        .layer(axum::middleware::from_fn_with_state(
            config.is_production(),
            hide_error_details,
        ))
        .layer(RequestBodyLimitLayer::new(
            config
                .max_video_size_bytes()
                .max(config.max_thumbnail_size_bytes()),
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn protected_routes(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/videos", API_PREFIX),
            post(handlers::video_create::create_video).get(handlers::video_get::list_videos),
        )
        .route(
            &format!("{}/videos/{{id}}", API_PREFIX),
            get(handlers::video_get::get_video),
        )
        .route(
            &format!("{}/videos/{{id}}/thumbnail", API_PREFIX),
            post(handlers::thumbnail_upload::upload_thumbnail)
                .layer(RequestBodyLimitLayer::new(config.max_thumbnail_size_bytes())),
        )
        .route(
            &format!("{}/videos/{{id}}/video", API_PREFIX),
            post(handlers::video_upload::upload_video)
                .layer(RequestBodyLimitLayer::new(config.max_video_size_bytes())),
        )
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
