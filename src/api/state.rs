use std::sync::Arc;

use crate::storage::JsonlStore;
use crate::tournament::Tournament;

#[derive(Clone)]
pub struct AppState {
    pub tournament: Arc<Tournament<JsonlStore>>,
    pub cors_origin: String,
}
