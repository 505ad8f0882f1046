use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Streaming Service API",
        version = "1.0.0",
        description = "Backend for the video-streaming demo: signup/login with JWT bearer tokens, movie metadata catalog, per-video chat messages, and Stripe payment intents.\n\n**Authentication:** protected routes expect the raw token in the `Authorization` header (no `Bearer ` prefix)."
    ),
    paths(
        // Users
        crate::api::users::sign_up,
        crate::api::users::login,
        crate::api::users::edit_user,

        // Movies
        crate::api::movies::get_all_movies,
        crate::api::movies::create_movie,
        crate::api::movies::get_movie,
        crate::api::movies::search_movies,
        crate::api::movies::search_by_name,
        crate::api::movies::aggregate_by_day,

        // Messages
        crate::api::messages::get_messages,
        crate::api::messages::create_message,

        // Payments
        crate::api::payments::get_config,
        crate::api::payments::create_payment_intent,
        crate::api::payments::payment_success,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::user_service::SignUpRequest,
            crate::services::user_service::LoginRequest,
            crate::services::user_service::UpdateUserRequest,
            crate::services::user_service::AuthResponse,
            crate::services::user_service::UserInfo,

            crate::models::Movie,
            crate::models::Message,
            crate::services::movie_service::NewMovieRequest,
            crate::services::movie_service::InsertedMovie,
            crate::services::movie_service::DayOfWeekCount,
            crate::services::message_service::NewMessageRequest,
            crate::services::message_service::InsertedMessage,

            crate::services::payment_service::PaymentIntentResponse,
            crate::services::payment_service::PaymentConfigResponse,

            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Signup, login and profile editing. Login is by email lookup; tokens expire after two days."),
        (name = "Movies", description = "Movie metadata catalog: listing, creation, lookup, title search and a day-of-week creation report."),
        (name = "Messages", description = "Poll-based chat messages attached to a video."),
        (name = "Payments", description = "Stripe payment-intent creation. Intents are fixed at $15.00 USD and not persisted locally."),
        (name = "Health", description = "Health check for monitoring."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Raw JWT token (no Bearer prefix)"))
                        .build(),
                ),
            );
        }
    }
}
