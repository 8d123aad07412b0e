use crate::app_state::AppState;
use crate::handlers::error_response;
use crate::models::{
    CreateTagRequest, NormalizeResponse, ResolveTagsRequest, TagResponse, TagsResponse,
};
use crate::utils::normalization::normalize;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use log;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NormalizeQuery {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub mode: Option<String>,
}

pub async fn normalize_tag(Query(params): Query<NormalizeQuery>) -> Json<NormalizeResponse> {
    let normalized = normalize(&params.q);
    Json(NormalizeResponse {
        raw: params.q,
        normalized,
    })
}

pub async fn create_tag(
    State(state): State<AppState>,
    Json(request): Json<CreateTagRequest>,
) -> Result<Json<TagResponse>, (StatusCode, String)> {
    match state.resolver.find_or_create_by_name(&request.name).await {
        Ok(tag) => Ok(Json(TagResponse { tag })),
        Err(e) => {
            log::error!("Failed to find or create tag '{}': {}", request.name, e);
            Err(error_response(e))
        }
    }
}

pub async fn resolve_tags(
    State(state): State<AppState>,
    Json(request): Json<ResolveTagsRequest>,
) -> Result<Json<TagsResponse>, (StatusCode, String)> {
    if request.tags.len() > state.max_batch_size {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "At most {} tags can be resolved per request",
                state.max_batch_size
            ),
        ));
    }

    match state.resolver.find_or_create_all_by_name(request.tags.as_slice()).await {
        Ok(tags) => Ok(Json(TagsResponse { tags })),
        Err(e) => {
            log::error!("Failed to resolve {} tags: {}", request.tags.len(), e);
            Err(error_response(e))
        }
    }
}

pub async fn search_tags(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<TagsResponse>, (StatusCode, String)> {
    let result = match params.mode.as_deref().unwrap_or("exact") {
        "exact" => state.resolver.named(&params.q).await,
        "like" => state.resolver.named_like(&params.q).await,
        other => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unknown search mode '{}', expected 'exact' or 'like'", other),
            ))
        }
    };

    match result {
        Ok(tags) => Ok(Json(TagsResponse { tags })),
        Err(e) => {
            log::error!("Failed to search tags for query '{}': {}", params.q, e);
            Err(error_response(e))
        }
    }
}
