use crate::models::Movie;
use crate::services::movie_service::{self, DayOfWeekCount, InsertedMovie, NewMovieRequest};
use crate::{database::MongoDB, utils::error::AppError};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: String,
}

#[utoipa::path(
    get,
    path = "/allMovies",
    tag = "Movies",
    responses(
        (status = 200, description = "Full movie catalog", body = [Movie])
    )
)]
pub async fn get_all_movies(db: web::Data<MongoDB>) -> HttpResponse {
    match movie_service::list_movies(&db).await {
        Ok(movies) => HttpResponse::Ok().json(movies),
        Err(e) => {
            log::error!("Failed to list movies: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/allMovies",
    tag = "Movies",
    request_body = NewMovieRequest,
    responses(
        (status = 201, description = "Movie created", body = InsertedMovie),
        (status = 401, description = "Token missing"),
        (status = 400, description = "Invalid token"),
        (status = 500, description = "Store failure")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_movie(
    db: web::Data<MongoDB>,
    request: web::Json<NewMovieRequest>,
) -> HttpResponse {
    log::info!("POST /allMovies - title: {}", request.title);

    match movie_service::create_movie(&db, &request).await {
        Ok(result) => HttpResponse::Created().json(result),
        Err(e) => {
            log::error!("Failed to create movie: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/allMovies/{id}",
    tag = "Movies",
    responses(
        (status = 200, description = "Movie document, or null when absent", body = Movie),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_movie(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();

    match movie_service::get_movie(&db, &id).await {
        Ok(movie) => HttpResponse::Ok().json(movie),
        Err(AppError::InvalidRequest(msg)) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "message": msg }))
        }
        Err(e) => {
            log::error!("Failed to get movie {}: {}", id, e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/allMovies/search",
    tag = "Movies",
    params(("title" = String, Query, description = "Case-insensitive substring of the title")),
    responses(
        (status = 200, description = "First matching movie, or null", body = Movie),
        (status = 404, description = "Search failed")
    )
)]
pub async fn search_movies(db: web::Data<MongoDB>, query: web::Query<SearchQuery>) -> HttpResponse {
    match movie_service::search_title(&db, &query.title).await {
        Ok(movie) => HttpResponse::Ok().json(movie),
        Err(e) => {
            log::error!("Movie search failed for {:?}: {}", query.title, e);
            HttpResponse::NotFound().json(serde_json::json!({ "message": "Search failed" }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/searchName/{text}",
    tag = "Movies",
    responses(
        (status = 200, description = "All movies matching the text", body = [Movie])
    )
)]
pub async fn search_by_name(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let text = path.into_inner();

    match movie_service::search_name(&db, &text).await {
        Ok(movies) => HttpResponse::Ok().json(movies),
        Err(e) => {
            log::error!("Name search failed for {:?}: {}", text, e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/aggregation",
    tag = "Movies",
    responses(
        (status = 200, description = "Movie count per day of week of createdAt", body = [DayOfWeekCount]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn aggregate_by_day(db: web::Data<MongoDB>) -> HttpResponse {
    match movie_service::count_by_day_of_week(&db).await {
        Ok(counts) => HttpResponse::Ok().json(counts),
        Err(e) => {
            log::error!("Aggregation failed: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}
