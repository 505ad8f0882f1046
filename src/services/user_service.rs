use crate::{
    database::{MongoDB, USERS_COLLECTION},
    models::User,
    services::token_service,
    utils::error::AppError,
};
use chrono::Utc;
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SignUpRequest {
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "photoUrl", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub token: String,
}

/// Create a new account and issue a token for it. Duplicate emails are
/// rejected; the unique index on users(email) backs this up if two
/// signups race.
pub async fn sign_up(db: &MongoDB, request: &SignUpRequest) -> Result<AuthResponse, AppError> {
    let collection = db.collection::<User>(USERS_COLLECTION);

    let existing = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    if existing.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let new_user = User {
        id: None,
        email: request.email.clone(),
        name: request.name.clone(),
        photo_url: request.photo_url.clone(),
        created_at: Some(Utc::now().timestamp_millis()),
        updated_at: None,
    };

    let result = collection
        .insert_one(&new_user)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let user_id = result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();

    let token =
        token_service::issue(&user_id, &new_user.email).map_err(AppError::Database)?;

    log::info!("User registered: {}", new_user.email);

    Ok(AuthResponse {
        user: UserInfo {
            id: user_id,
            email: new_user.email,
            name: new_user.name,
            photo_url: new_user.photo_url,
        },
        token,
    })
}

/// Look the user up by email and issue a fresh token.
pub async fn login(db: &MongoDB, request: &LoginRequest) -> Result<AuthResponse, AppError> {
    let collection = db.collection::<User>(USERS_COLLECTION);

    let user = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("User not found !".to_string()))?;

    let user_id = user.id.map(|oid| oid.to_hex()).unwrap_or_default();

    let token = token_service::issue(&user_id, &user.email).map_err(AppError::Database)?;

    Ok(AuthResponse {
        user: UserInfo {
            id: user_id,
            email: user.email,
            name: user.name,
            photo_url: user.photo_url,
        },
        token,
    })
}

/// Partial update keyed by email. Only the provided fields are touched.
pub async fn edit_user(
    db: &MongoDB,
    email: &str,
    request: &UpdateUserRequest,
) -> Result<u64, AppError> {
    let collection = db.collection::<User>(USERS_COLLECTION);

    let mut set = doc! { "updatedAt": Utc::now().timestamp_millis() };
    if let Some(name) = &request.name {
        set.insert("name", name);
    }
    if let Some(photo_url) = &request.photo_url {
        set.insert("photoUrl", photo_url);
    }

    let result = collection
        .update_one(doc! { "email": email }, doc! { "$set": set })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    if result.matched_count == 0 {
        log::warn!("User edit matched no document: {}", email);
    }

    Ok(result.modified_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MongoDB;

    async fn test_db() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/videoStreamingTestDB".to_string());
        MongoDB::new(&uri).await.expect("MongoDB must be running")
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn signup_issues_token_for_inserted_id() {
        std::env::set_var("JWT_SECRET", "test-secret");
        let db = test_db().await;

        let email = format!("signup-{}@test.com", Utc::now().timestamp_millis());
        let request = SignUpRequest {
            email: email.clone(),
            name: Some("Test".to_string()),
            photo_url: None,
        };

        let response = sign_up(&db, &request).await.unwrap();
        assert_eq!(response.user.email, email);

        let claims = token_service::verify(&response.token).unwrap();
        assert_eq!(claims.sub, response.user.id);
        assert_eq!(claims.email, email);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn duplicate_signup_is_rejected() {
        std::env::set_var("JWT_SECRET", "test-secret");
        let db = test_db().await;

        let email = format!("dup-{}@test.com", Utc::now().timestamp_millis());
        let request = SignUpRequest {
            email,
            name: None,
            photo_url: None,
        };

        sign_up(&db, &request).await.unwrap();
        let second = sign_up(&db, &request).await;
        assert!(matches!(second, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn login_unknown_email_is_not_found() {
        std::env::set_var("JWT_SECRET", "test-secret");
        let db = test_db().await;

        let request = LoginRequest {
            email: "nobody@nowhere.test".to_string(),
        };

        let result = login(&db, &request).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
