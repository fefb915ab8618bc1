use actix_web::{web, HttpRequest, HttpResponse};
use std::time::Instant;

use ea_core::repositories::{ConfirmedEmailRepository, PendingVerificationRepository};
use ea_shared::email::mask_email;
use ea_shared::{DetailedResponse, ResponseMeta};

use crate::dto::{RedeemRequest, RedeemResponse};
use crate::handlers::{domain_error_response, request_id};
use crate::state::AppState;

/// Handler for GET /api/v1/verify/{token}
///
/// Target of the emailed link.
pub async fn verify_link<P, C>(
    req: HttpRequest,
    state: web::Data<AppState<P, C>>,
    token: web::Path<String>,
) -> HttpResponse
where
    P: PendingVerificationRepository + 'static,
    C: ConfirmedEmailRepository + 'static,
{
    redeem_token(&req, &state, &token).await
}

/// Handler for POST /api/v1/verification/redeem
///
/// # Request Body
///
/// ```json
/// { "token": "..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "success",
///     "data": { "email": "user@example.com", "confirmed_at": "..." },
///     "meta": { "timestamp": "...", "version": "v1", "request_id": "..." }
/// }
/// ```
///
/// ## Errors
/// - 400 `INVALID_OR_EXPIRED` for a wrong, expired or already used token
/// - 503 `STORAGE_UNAVAILABLE` when the store cannot be reached
pub async fn redeem<P, C>(
    req: HttpRequest,
    state: web::Data<AppState<P, C>>,
    request: web::Json<RedeemRequest>,
) -> HttpResponse
where
    P: PendingVerificationRepository + 'static,
    C: ConfirmedEmailRepository + 'static,
{
    redeem_token(&req, &state, &request.token).await
}

/// Surrounding whitespace is dropped here; the service fingerprints exactly
/// what it is given
async fn redeem_token<P, C>(req: &HttpRequest, state: &AppState<P, C>, token: &str) -> HttpResponse
where
    P: PendingVerificationRepository + 'static,
    C: ConfirmedEmailRepository + 'static,
{
    let request_id = request_id(req);
    let start_time = Instant::now();

    match state.verification_service.redeem(token.trim()).await {
        Ok(confirmed) => {
            tracing::info!(
                request_id = %request_id,
                email = %mask_email(&confirmed.email),
                "Email verified"
            );

            let meta = ResponseMeta {
                response_time_ms: Some(start_time.elapsed().as_millis() as u64),
                ..ResponseMeta::with_request_id(request_id)
            };

            HttpResponse::Ok().json(DetailedResponse::success(
                RedeemResponse {
                    email: confirmed.email,
                    confirmed_at: confirmed.confirmed_at,
                },
                meta,
            ))
        }
        Err(error) => domain_error_response(&error, &request_id),
    }
}
