use crate::services::payment_service::{self, PaymentConfigResponse, PaymentIntentResponse};
use actix_web::{web, HttpResponse};

#[utoipa::path(
    get,
    path = "/config",
    tag = "Payments",
    responses(
        (status = 200, description = "Stripe publishable key for browser clients", body = PaymentConfigResponse)
    )
)]
pub async fn get_config() -> HttpResponse {
    match payment_service::publishable_key() {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(e) => {
            log::error!("Payment config unavailable: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}

/// The request body is accepted but ignored: the intent amount is fixed
/// server-side at $15.00 USD.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Client secret for the new intent", body = PaymentIntentResponse),
        (status = 400, description = "Provider failure")
    )
)]
pub async fn create_payment_intent(_body: web::Bytes) -> HttpResponse {
    log::info!("POST /create-payment-intent");

    match payment_service::create_payment_intent().await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Payment intent creation failed: {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": { "message": "Payment intent creation failed" }
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/payment-success",
    tag = "Payments",
    responses(
        (status = 200, description = "Confirmation acknowledged")
    )
)]
pub async fn payment_success(body: web::Json<serde_json::Value>) -> HttpResponse {
    // Logged only; nothing is persisted or reconciled with Stripe.
    log::info!("POST /payment-success - payload: {}", body.into_inner());

    HttpResponse::Ok().json(serde_json::json!({ "received": true }))
}
