use actix_web::web;
use serde::Deserialize;

use crate::comment_service::CommentService;
use crate::domain::CommentPayload;
use crate::envelope::ResponseEnvelope;

// Ids stay raw strings here; the service decides how a malformed one is
// reported.
#[derive(Deserialize, Debug)]
pub struct CommentPathParams {
    pub id: String,
}

#[tracing::instrument(skip(service, payload))]
pub async fn create_comment(
    payload: web::Json<CommentPayload>,
    service: web::Data<CommentService>,
) -> ResponseEnvelope {
    service.register_comment(payload.into_inner()).await
}

#[tracing::instrument(skip(service, payload), fields(comment_id=%path.id))]
pub async fn update_comment(
    path: web::Path<CommentPathParams>,
    payload: web::Json<CommentPayload>,
    service: web::Data<CommentService>,
) -> ResponseEnvelope {
    service.update_comment(&path.id, payload.into_inner()).await
}

#[tracing::instrument(skip(service), fields(post_id=%path.id))]
pub async fn show_comments_for_post(
    path: web::Path<CommentPathParams>,
    service: web::Data<CommentService>,
) -> ResponseEnvelope {
    service.get_comments(&path.id).await
}

#[tracing::instrument(skip(service), fields(comment_id=%path.id))]
pub async fn delete_comment(
    path: web::Path<CommentPathParams>,
    service: web::Data<CommentService>,
) -> ResponseEnvelope {
    service.delete_comment(&path.id).await
}
