use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Chat message attached to a video. `videoId` is a soft reference,
/// nothing enforces that the movie exists.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Message {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    #[serde(rename = "videoId")]
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    pub text: String,
    /// Unix epoch milliseconds, set by the server at insert time.
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}
