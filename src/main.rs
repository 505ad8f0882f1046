mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{guard, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Configuration: missing secrets abort startup instead of running
    // with unverifiable tokens or unusable payment credentials.
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY must be set");
    env::var("STRIPE_PUBLISHABLE_KEY").expect("STRIPE_PUBLISHABLE_KEY must be set");

    log::info!("Starting Streaming Service...");

    // Initialize MongoDB connection; unreachable store is fatal here
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("MongoDB connected successfully");
    log::info!("Server starting on {}:{}", host, port);
    log::info!(
        "Swagger UI available at: http://{}:{}/swagger-ui/",
        host,
        port
    );

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_origin("http://127.0.0.1:5173")
            .allowed_methods(vec!["GET", "POST", "PATCH", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        if let Ok(frontend_url) = env::var("FRONTEND_URL") {
            cors = cors.allowed_origin(&frontend_url);
        }

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi),
            )
            // Banner & health
            .route("/", web::get().to(api::health::index))
            .route("/health", web::get().to(api::health::health_check))
            // Users
            .route("/signUp", web::post().to(api::users::sign_up))
            .route("/login", web::post().to(api::users::login))
            .service(
                web::resource("/userEdit/{email}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::patch().to(api::users::edit_user)),
            )
            // Movies. Order matters: the search route must be registered
            // before the `{id}` catch-all, and the guarded POST resource
            // before the public GET so the gate wraps only the mutation.
            .route(
                "/allMovies/search",
                web::get().to(api::movies::search_movies),
            )
            .service(
                web::resource("/allMovies")
                    .guard(guard::Post())
                    .wrap(middleware::AuthMiddleware)
                    .route(web::post().to(api::movies::create_movie)),
            )
            .route("/allMovies", web::get().to(api::movies::get_all_movies))
            .route("/allMovies/{id}", web::get().to(api::movies::get_movie))
            .route(
                "/searchName/{text}",
                web::get().to(api::movies::search_by_name),
            )
            .route(
                "/aggregation",
                web::get().to(api::movies::aggregate_by_day),
            )
            // Messages
            .route("/messages/{id}", web::get().to(api::messages::get_messages))
            .route("/messages", web::post().to(api::messages::create_message))
            // Payments
            .route("/config", web::get().to(api::payments::get_config))
            .route(
                "/create-payment-intent",
                web::post().to(api::payments::create_payment_intent),
            )
            .route(
                "/payment-success",
                web::post().to(api::payments::payment_success),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
