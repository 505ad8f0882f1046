use crate::models::Message;
use crate::services::message_service::{self, InsertedMessage, NewMessageRequest};
use crate::database::MongoDB;
use actix_web::{web, HttpResponse};

#[utoipa::path(
    get,
    path = "/messages/{id}",
    tag = "Messages",
    responses(
        (status = 200, description = "All messages for the video", body = [Message]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_messages(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let video_id = path.into_inner();

    match message_service::list_for_video(&db, &video_id).await {
        Ok(messages) => HttpResponse::Ok().json(messages),
        Err(e) => {
            log::error!("Failed to list messages for {}: {}", video_id, e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/messages",
    tag = "Messages",
    request_body = NewMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = InsertedMessage),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_message(
    db: web::Data<MongoDB>,
    request: web::Json<NewMessageRequest>,
) -> HttpResponse {
    match message_service::create_message(&db, &request).await {
        Ok(result) => {
            HttpResponse::Created().json(serde_json::json!({ "result": result }))
        }
        Err(e) => {
            log::error!("Failed to create message: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "message": "Internal server error" }))
        }
    }
}
