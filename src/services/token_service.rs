use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token lifetime: two days from issuance.
pub const TOKEN_TTL_DAYS: i64 = 2;

/// JWT claims carried by every bearer token. A snapshot of the user at
/// issuance time; there is no revocation list and no refresh flow.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // user id (ObjectId hex)
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    SignatureMismatch,
    Malformed,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Expired => write!(f, "token expired"),
            TokenError::SignatureMismatch => write!(f, "token signature mismatch"),
            TokenError::Malformed => write!(f, "token malformed"),
        }
    }
}

// Startup validates this in main; signing with a fallback secret would
// turn a configuration error into silently forgeable tokens.
fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").expect("JWT_SECRET must be set")
}

/// Sign a token for the given user snapshot, expiring in two days.
pub fn issue(user_id: &str, email: &str) -> Result<String, String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate token: {}", e))
}

/// Verify signature and expiry, returning the decoded claims.
pub fn verify(token: &str) -> Result<Claims, TokenError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
        _ => TokenError::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_test_secret() {
        std::env::set_var("JWT_SECRET", "test-secret");
    }

    #[test]
    fn issue_then_verify_round_trips() {
        set_test_secret();

        let token = issue("65f0c0ffee0ddba11ca7ab1e", "a@b.com").unwrap();
        let claims = verify(&token).unwrap();

        assert_eq!(claims.sub, "65f0c0ffee0ddba11ca7ab1e");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(
            claims.exp - claims.iat,
            (TOKEN_TTL_DAYS * 24 * 60 * 60) as usize
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        set_test_secret();

        // Expired well past the validator's leeway window.
        let now = Utc::now();
        let claims = Claims {
            sub: "user".to_string(),
            email: "a@b.com".to_string(),
            iat: (now - Duration::days(3)).timestamp() as usize,
            exp: (now - Duration::days(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_ref()),
        )
        .unwrap();

        assert_eq!(verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        set_test_secret();

        let now = Utc::now();
        let claims = Claims {
            sub: "user".to_string(),
            email: "a@b.com".to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::days(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("some-other-secret".as_ref()),
        )
        .unwrap();

        assert_eq!(verify(&token), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn garbage_token_is_malformed() {
        set_test_secret();

        assert_eq!(verify("not-a-jwt"), Err(TokenError::Malformed));
    }
}
