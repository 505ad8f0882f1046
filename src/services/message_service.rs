use crate::{
    database::{MongoDB, MESSAGES_COLLECTION},
    models::Message,
    utils::error::AppError,
};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewMessageRequest {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub sender: Option<String>,
    pub text: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct InsertedMessage {
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

/// All messages for a video. Delivery is poll-based; clients re-fetch
/// this list rather than receiving pushes.
pub async fn list_for_video(db: &MongoDB, video_id: &str) -> Result<Vec<Message>, AppError> {
    let collection = db.collection::<Message>(MESSAGES_COLLECTION);

    collection
        .find(doc! { "videoId": video_id })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Insert a message with a server-set `createdAt` timestamp.
pub async fn create_message(
    db: &MongoDB,
    request: &NewMessageRequest,
) -> Result<InsertedMessage, AppError> {
    let collection = db.collection::<Message>(MESSAGES_COLLECTION);

    let message = Message {
        id: None,
        video_id: request.video_id.clone(),
        sender: request.sender.clone(),
        text: request.text.clone(),
        created_at: Utc::now().timestamp_millis(),
    };

    let result = collection
        .insert_one(&message)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let inserted_id = result
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();

    Ok(InsertedMessage { inserted_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn messages_are_scoped_to_their_video() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/videoStreamingTestDB".to_string());
        let db = MongoDB::new(&uri).await.expect("MongoDB must be running");

        let video_id = format!("video-{}", Utc::now().timestamp_millis());
        let request = NewMessageRequest {
            video_id: video_id.clone(),
            sender: Some("tester".to_string()),
            text: "great movie".to_string(),
        };
        create_message(&db, &request).await.unwrap();

        let messages = list_for_video(&db, &video_id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "great movie");

        let other = list_for_video(&db, "some-other-video").await.unwrap();
        assert!(other.is_empty());
    }
}
