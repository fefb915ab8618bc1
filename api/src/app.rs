//! Application factory
//!
//! Builds the Actix-web application around an already-initialised
//! [`AppState`]. Storage backends are chosen by the caller.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use ea_core::repositories::{ConfirmedEmailRepository, PendingVerificationRepository};
use ea_shared::{error_codes, ApiResponse, Environment, ErrorResponse, ServerConfig};

use crate::handlers::json_error_handler;
use crate::middleware::create_cors;
use crate::routes::verification::{redeem, request_verification, verify_link};
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<P, C>(
    app_state: web::Data<AppState<P, C>>,
    server: &ServerConfig,
    environment: Environment,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    P: PendingVerificationRepository + 'static,
    C: ConfirmedEmailRepository + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(Logger::default())
        .wrap(create_cors(environment, server))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/verification")
                        .route("/request", web::post().to(request_verification::<P, C>))
                        .route("/redeem", web::post().to(redeem::<P, C>)),
                )
                .route("/verify/{token}", web::get().to(verify_link::<P, C>)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "status": "healthy",
        "service": "earlyaccess-api",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
