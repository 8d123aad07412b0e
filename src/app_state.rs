use crate::services::tag_service::TagResolver;

#[derive(Clone)]
pub struct AppState {
    pub resolver: TagResolver,
    pub max_batch_size: usize,
    pub service_name: String,
}
