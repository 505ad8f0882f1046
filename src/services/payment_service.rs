use crate::utils::error::AppError;
use serde::Serialize;
use std::env;

/// Every intent is created for a fixed $15.00 USD charge; the request
/// body amount is ignored. Observed contract of the current clients.
pub const PAYMENT_AMOUNT_CENTS: u64 = 1500;
pub const PAYMENT_CURRENCY: &str = "usd";

const STRIPE_PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaymentConfigResponse {
    #[serde(rename = "publishableKey")]
    pub publishable_key: String,
}

/// Publishable key handed to browser clients for Stripe.js.
pub fn publishable_key() -> Result<PaymentConfigResponse, AppError> {
    let key = env::var("STRIPE_PUBLISHABLE_KEY")
        .map_err(|_| AppError::Payment("STRIPE_PUBLISHABLE_KEY not configured".to_string()))?;

    Ok(PaymentConfigResponse {
        publishable_key: key,
    })
}

/// Create a payment intent via the Stripe REST API. No local record of
/// the intent is kept; the provider owns its lifecycle.
pub async fn create_payment_intent() -> Result<PaymentIntentResponse, AppError> {
    let secret_key = env::var("STRIPE_SECRET_KEY")
        .map_err(|_| AppError::Payment("STRIPE_SECRET_KEY not configured".to_string()))?;

    let client = reqwest::Client::new();
    let response = client
        .post(STRIPE_PAYMENT_INTENTS_URL)
        .basic_auth(&secret_key, None::<&str>)
        .form(&[
            ("amount", PAYMENT_AMOUNT_CENTS.to_string()),
            ("currency", PAYMENT_CURRENCY.to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
        ])
        .send()
        .await
        .map_err(|e| AppError::Payment(format!("Stripe request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::error!("Stripe returned {}: {}", status, body);
        return Err(AppError::Payment(format!(
            "Stripe returned status {}",
            status
        )));
    }

    let intent: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Payment(format!("Invalid Stripe response: {}", e)))?;

    let client_secret = intent["client_secret"]
        .as_str()
        .ok_or_else(|| AppError::Payment("No client_secret in Stripe response".to_string()))?;

    Ok(PaymentIntentResponse {
        client_secret: client_secret.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_amount_is_fixed_at_fifteen_dollars() {
        assert_eq!(PAYMENT_AMOUNT_CENTS, 1500);
        assert_eq!(PAYMENT_CURRENCY, "usd");
    }

    #[test]
    fn missing_publishable_key_is_a_payment_error() {
        std::env::remove_var("STRIPE_PUBLISHABLE_KEY");
        assert!(matches!(publishable_key(), Err(AppError::Payment(_))));
    }
}
