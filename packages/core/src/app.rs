use std::sync::Arc;

use rosterbox_database::Database;

/// Shared handles the API endpoints extract from the request context.
#[derive(Clone)]
pub struct AppState {
    pub database: Arc<Box<dyn Database>>,
}
