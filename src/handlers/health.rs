use crate::app_state::AppState;
use crate::models::HealthResponse;
use axum::{extract::State, http::StatusCode, response::Json};

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.service_name,
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryTagStore;
    use crate::services::tag_service::TagResolver;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_reports_configured_service() {
        let state = AppState {
            resolver: TagResolver::new(Arc::new(MemoryTagStore::new())),
            max_batch_size: 10,
            service_name: "labels-eu".to_string(),
        };
        let (status, Json(response)) = health_check(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "labels-eu");
    }
}
