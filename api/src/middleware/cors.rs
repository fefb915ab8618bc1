//! CORS middleware configuration for cross-origin requests.
//!
//! The signup page is usually served from a different origin than the API.
//! Development allows any origin; other environments only allow the origins
//! listed in `ServerConfig::allowed_origins`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ea_shared::{Environment, ServerConfig};

/// Max age for preflight cache, in seconds
const CORS_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for the environment.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment.is_development() {
        create_development_cors()
    } else {
        create_restricted_cors(&server.allowed_origins)
    }
}

fn create_development_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(CORS_MAX_AGE)
}

fn create_restricted_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(CORS_MAX_AGE);

    for origin in allowed_origins {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}
