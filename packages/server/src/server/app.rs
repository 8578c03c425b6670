//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use twilio::{TwilioOptions, TwilioService};

use crate::domains::auth::JwtService;
use crate::kernel::ServerDeps;
use crate::server::middleware::require_auth;
use crate::server::routes::{
    create_product_handler, create_service_handler, delete_product_handler,
    delete_service_handler, get_product_handler, get_service_handler, get_user_handler,
    health_handler, image_handler, list_products_handler, list_services_handler, login_handler,
    signup_handler, update_product_handler, update_service_handler, verify_login_handler,
    verify_signup_handler, video_handler,
};

/// Whole-request body ceiling. Room for a handful of files under the 20 MB
/// per-file cap; the per-file limit itself is enforced while reading parts.
const MAX_REQUEST_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub server_deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
}

/// Build the Axum application router.
///
/// Takes the state explicitly so tests can wire in-memory dependencies and
/// drive the exact router the binary serves.
pub fn build_router(state: AxumAppState) -> Router {
    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting: 10 requests per second per IP with bursts up to 20
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor) // Extract IP from X-Forwarded-For header
            .use_headers()
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    let public = Router::new()
        .route("/signup", post(signup_handler))
        .route("/verify-signup", post(verify_signup_handler))
        .route("/login", post(login_handler))
        .route("/verify-login", post(verify_login_handler))
        .route("/image/:file_id", get(image_handler))
        .route("/video/:file_id", get(video_handler));

    let protected = Router::new()
        .route("/user/:id", get(get_user_handler))
        .route(
            "/vendor/products",
            post(create_product_handler).get(list_products_handler),
        )
        .route(
            "/vendor/products/:id",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .route(
            "/vendor/services",
            post(create_service_handler).get(list_services_handler),
        )
        .route(
            "/vendor/services/:id",
            get(get_service_handler)
                .put(update_service_handler)
                .delete(delete_service_handler),
        )
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public
        .merge(protected)
        .route("/health", get(health_handler))
        .layer(rate_limit_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the production application: Postgres-backed stores, Twilio Verify
/// for code delivery.
pub fn build_app(
    pool: PgPool,
    twilio_account_sid: String,
    twilio_auth_token: String,
    twilio_verify_service_sid: String,
    jwt_secret: String,
    jwt_issuer: String,
) -> Router {
    let twilio = Arc::new(TwilioService::new(TwilioOptions {
        account_sid: twilio_account_sid,
        auth_token: twilio_auth_token,
        verify_service_sid: twilio_verify_service_sid,
    }));

    let jwt_service = Arc::new(JwtService::new(&jwt_secret, jwt_issuer));

    let server_deps = Arc::new(ServerDeps::postgres(pool, twilio, jwt_service.clone()));

    build_router(AxumAppState {
        server_deps,
        jwt_service,
    })
}
