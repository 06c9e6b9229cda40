//! Shared application state for all routes.

use crate::registry::TableRegistry;
use sqlx::MySqlPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
    pub registry: Arc<TableRegistry>,
}
