use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use validator::Validate;

use crate::{
    entities::generation::{DeleteGenerationRequest, GenerateImageRequest, ListGenerationsQuery},
    errors::AppError,
    use_cases::extractors::CurrentUser,
    AppState,
};

#[instrument(skip(state, caller, data), fields(owner_id = caller.owner_id()))]
pub async fn generate(
    state: web::Data<AppState>,
    caller: CurrentUser,
    data: web::Json<GenerateImageRequest>,
) -> Result<impl Responder, AppError> {
    let response = state
        .generation_handler
        .generate(caller.owner_id(), data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, caller, query), fields(owner_id = caller.owner_id()))]
pub async fn list(
    state: web::Data<AppState>,
    caller: CurrentUser,
    query: web::Query<ListGenerationsQuery>,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();
    query.validate()?;

    let generations = state
        .generation_handler
        .list_generations(caller.owner_id(), query.limit)
        .await?;

    Ok(HttpResponse::Ok().json(generations))
}

#[instrument(skip(state, caller, data), fields(owner_id = caller.owner_id()))]
pub async fn delete(
    state: web::Data<AppState>,
    caller: CurrentUser,
    data: web::Json<DeleteGenerationRequest>,
) -> Result<impl Responder, AppError> {
    let response = state
        .generation_handler
        .delete_generation(caller.owner_id(), data.id)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state))]
pub async fn models(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.generation_handler.list_models())
}
