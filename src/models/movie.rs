use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stored movie metadata. The app never stores video content itself,
/// only the catalog entry pointing at it.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Movie {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "videoUrl", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(rename = "thumbnailUrl", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Unix epoch milliseconds, set by the server at insert time.
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}
