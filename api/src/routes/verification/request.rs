use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use ea_core::repositories::{ConfirmedEmailRepository, PendingVerificationRepository};
use ea_core::services::{MailerTrait, OutboundEmail};
use ea_shared::email::mask_email;
use ea_shared::{DetailedResponse, ResponseMeta};

use crate::dto::{RequestVerificationRequest, RequestVerificationResponse};
use crate::handlers::{domain_error_response, request_id, validation_error_response};
use crate::state::AppState;

const EMAIL_SUBJECT: &str = "Confirm your email address";

/// Handler for POST /api/v1/verification/request
///
/// Issues a verification token and hands the link to the mailer. The token
/// itself never appears in the response.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// # Response
///
/// ## Accepted (202)
/// ```json
/// {
///     "status": "success",
///     "data": {
///         "message": "If the address is valid, a verification link is on its way.",
///         "expires_in": 1800
///     },
///     "meta": { "timestamp": "...", "version": "v1", "request_id": "..." }
/// }
/// ```
pub async fn request_verification<P, C>(
    req: HttpRequest,
    state: web::Data<AppState<P, C>>,
    request: web::Json<RequestVerificationRequest>,
) -> HttpResponse
where
    P: PendingVerificationRepository + 'static,
    C: ConfirmedEmailRepository + 'static,
{
    let request_id = request_id(&req);
    let start_time = Instant::now();

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors, &request_id);
    }

    let result = match state
        .verification_service
        .request_verification(&request.email)
        .await
    {
        Ok(result) => result,
        Err(error) => return domain_error_response(&error, &request_id),
    };

    let ttl = state.verification_service.token_ttl();
    let link = state.verification_config.verification_link(&result.secret);
    let message = verification_email(&result.email, &link, ttl.num_minutes());
    dispatch_email(state.mailer.clone(), message, request_id.clone());

    tracing::info!(
        request_id = %request_id,
        email = %mask_email(&result.email),
        "Verification requested"
    );

    let meta = ResponseMeta {
        response_time_ms: Some(start_time.elapsed().as_millis() as u64),
        ..ResponseMeta::with_request_id(request_id)
    };

    HttpResponse::Accepted().json(DetailedResponse::success(
        RequestVerificationResponse {
            message: "If the address is valid, a verification link is on its way.".to_string(),
            expires_in: ttl.num_seconds(),
        },
        meta,
    ))
}

/// Compose the message carrying the verification link
fn verification_email(recipient: &str, link: &str, ttl_minutes: i64) -> OutboundEmail {
    OutboundEmail {
        recipient: recipient.to_string(),
        subject: EMAIL_SUBJECT.to_string(),
        body: format!(
            "Hi,\n\n\
             Please confirm your email address to join the early access list:\n\n\
             {}\n\n\
             This link expires in {} minutes and works only once. \
             If you did not ask for it, you can ignore this message.\n",
            link, ttl_minutes
        ),
    }
}

/// Send without blocking the response; failures are logged and dropped
fn dispatch_email(mailer: Arc<dyn MailerTrait>, message: OutboundEmail, request_id: String) {
    actix_web::rt::spawn(async move {
        let recipient = mask_email(&message.recipient);
        match mailer.send(&message).await {
            Ok(message_id) => tracing::info!(
                request_id = %request_id,
                recipient = %recipient,
                message_id = %message_id,
                event = "verification_email_sent",
                "Verification email sent"
            ),
            Err(e) => tracing::error!(
                request_id = %request_id,
                recipient = %recipient,
                error = %e,
                event = "verification_email_failed",
                "Failed to send verification email"
            ),
        }
    });
}
