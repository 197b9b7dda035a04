use actix_web::{
    http::header::{CacheControl, CacheDirective},
    web, HttpResponse,
};
use tracing::instrument;

use crate::{errors::AppError, utils::storage_key::is_image_key, AppState};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[instrument(skip(state))]
pub async fn get_media(
    state: web::Data<AppState>,
    key: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let key = key.into_inner();
    if !is_image_key(&key) {
        return Err(AppError::NotFound("Image not found".to_string()));
    }

    let bytes = state
        .storage
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    let content_type = infer::get(&bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or(FALLBACK_CONTENT_TYPE);

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(CacheControl(vec![CacheDirective::Public, CacheDirective::MaxAge(31_536_000)]))
        .body(bytes))
}
