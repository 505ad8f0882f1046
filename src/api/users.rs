use crate::services::token_service::Claims;
use crate::services::user_service::{
    self, AuthResponse, LoginRequest, SignUpRequest, UpdateUserRequest,
};
use crate::{database::MongoDB, utils::error::AppError};
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

#[utoipa::path(
    post,
    path = "/signUp",
    tag = "Users",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn sign_up(
    db: web::Data<MongoDB>,
    request: web::Json<SignUpRequest>,
) -> HttpResponse {
    log::info!("POST /signUp - email: {}", request.email);

    match user_service::sign_up(&db, &request).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(AppError::Conflict(msg)) => {
            log::warn!("Signup rejected: {} - {}", request.email, msg);
            HttpResponse::Conflict().json(serde_json::json!({ "message": msg }))
        }
        Err(e) => {
            log::error!("Signup failed: {} - {}", request.email, e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 404, description = "Unknown email"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn login(db: web::Data<MongoDB>, request: web::Json<LoginRequest>) -> HttpResponse {
    log::info!("POST /login - email: {}", request.email);

    match user_service::login(&db, &request).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(AppError::NotFound(msg)) => {
            HttpResponse::NotFound().json(serde_json::json!({ "message": msg }))
        }
        Err(e) => {
            log::error!("Login failed: {} - {}", request.email, e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}

#[utoipa::path(
    patch,
    path = "/userEdit/{email}",
    tag = "Users",
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "User updated"),
        (status = 401, description = "Token missing"),
        (status = 400, description = "Invalid token"),
        (status = 500, description = "Store failure")
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_user(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
    req: HttpRequest,
) -> HttpResponse {
    let email = path.into_inner();

    let caller = req
        .extensions()
        .get::<Claims>()
        .map(|claims| claims.email.clone())
        .unwrap_or_default();
    log::info!("PATCH /userEdit/{} - caller: {}", email, caller);

    match user_service::edit_user(&db, &email, &request).await {
        Ok(modified) => {
            log::info!("User edit applied: {} ({} modified)", email, modified);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            log::error!("User edit failed: {} - {}", email, e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}
