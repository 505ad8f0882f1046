use crate::{
    database::{MongoDB, MOVIES_COLLECTION},
    models::Movie,
    utils::error::AppError,
};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, from_document, oid::ObjectId, Document};
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewMovieRequest {
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    #[serde(rename = "videoUrl")]
    pub video_url: Option<String>,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct InsertedMovie {
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

/// One row of the day-of-week report. `dayOfWeek` follows Mongo's
/// `$dayOfWeek` numbering: 1 = Sunday through 7 = Saturday.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DayOfWeekCount {
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: i32,
    pub count: i64,
}

pub async fn list_movies(db: &MongoDB) -> Result<Vec<Movie>, AppError> {
    let collection = db.collection::<Movie>(MOVIES_COLLECTION);

    collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Insert a movie with a server-set `createdAt` timestamp.
pub async fn create_movie(
    db: &MongoDB,
    request: &NewMovieRequest,
) -> Result<InsertedMovie, AppError> {
    let collection = db.collection::<Movie>(MOVIES_COLLECTION);

    let movie = Movie {
        id: None,
        title: request.title.clone(),
        description: request.description.clone(),
        genre: request.genre.clone(),
        video_url: request.video_url.clone(),
        thumbnail_url: request.thumbnail_url.clone(),
        created_at: Utc::now().timestamp_millis(),
    };

    let result = collection
        .insert_one(&movie)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let inserted_id = result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();

    log::info!("Movie created: {} ({})", movie.title, inserted_id);

    Ok(InsertedMovie { inserted_id })
}

/// Fetch one movie by its ObjectId. Malformed ids are a client error.
pub async fn get_movie(db: &MongoDB, id: &str) -> Result<Option<Movie>, AppError> {
    let oid = ObjectId::parse_str(id)
        .map_err(|e| AppError::InvalidRequest(format!("Invalid movie id: {}", e)))?;

    let collection = db.collection::<Movie>(MOVIES_COLLECTION);

    collection
        .find_one(doc! { "_id": oid })
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// First movie whose title contains the query text, case-insensitive.
pub async fn search_title(db: &MongoDB, query: &str) -> Result<Option<Movie>, AppError> {
    let collection = db.collection::<Movie>(MOVIES_COLLECTION);

    collection
        .find_one(title_filter(query))
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// All movies whose title contains the text, backed by the title index.
pub async fn search_name(db: &MongoDB, text: &str) -> Result<Vec<Movie>, AppError> {
    let collection = db.collection::<Movie>(MOVIES_COLLECTION);

    // The route contract ensures the supporting index before querying.
    let title_index = IndexModel::builder().keys(doc! { "title": 1 }).build();
    collection
        .create_index(title_index)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    collection
        .find(title_filter(text))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Movie count grouped by the day of week each movie was created.
pub async fn count_by_day_of_week(db: &MongoDB) -> Result<Vec<DayOfWeekCount>, AppError> {
    let collection = db.collection::<Document>(MOVIES_COLLECTION);

    // createdAt is stored as epoch millis, so convert before $dayOfWeek
    let pipeline = vec![
        doc! { "$group": {
            "_id": { "$dayOfWeek": { "$toDate": "$createdAt" } },
            "count": { "$sum": 1 },
        }},
        doc! { "$project": {
            "_id": 0,
            "dayOfWeek": "$_id",
            "count": 1,
        }},
        doc! { "$sort": { "dayOfWeek": 1 } },
    ];

    let docs: Vec<Document> = collection
        .aggregate(pipeline)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    docs.into_iter()
        .map(|d| from_document(d).map_err(|e| AppError::Database(e.to_string())))
        .collect()
}

fn title_filter(text: &str) -> Document {
    doc! { "title": { "$regex": escape_regex(text), "$options": "i" } }
}

// User text goes into a $regex verbatim otherwise.
fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if ".^$*+?()[]{}|\\".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_regex_passes_plain_text_through() {
        assert_eq!(escape_regex("The Matrix"), "The Matrix");
    }

    #[test]
    fn escape_regex_neutralizes_metacharacters() {
        assert_eq!(escape_regex("what?"), "what\\?");
        assert_eq!(escape_regex("a.b(c)"), "a\\.b\\(c\\)");
        assert_eq!(escape_regex("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn title_filter_is_case_insensitive() {
        let filter = title_filter("matrix");
        let title = filter.get_document("title").unwrap();
        assert_eq!(title.get_str("$regex").unwrap(), "matrix");
        assert_eq!(title.get_str("$options").unwrap(), "i");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn search_matches_substring_case_insensitive() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/videoStreamingTestDB".to_string());
        let db = MongoDB::new(&uri).await.expect("MongoDB must be running");

        let request = NewMovieRequest {
            title: "The Matrix".to_string(),
            description: None,
            genre: Some("sci-fi".to_string()),
            video_url: None,
            thumbnail_url: None,
        };
        create_movie(&db, &request).await.unwrap();

        let found = search_title(&db, "matrix").await.unwrap();
        assert!(found.is_some());
        assert!(found.unwrap().title.contains("Matrix"));
    }
}
