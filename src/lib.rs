//! Data-driven CRUD REST API over the blood bank schema.
//!
//! Ten table descriptors drive everything: routes, SQL, and responses are
//! generated from `{ table name, writable columns, primary-key column }`.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use config::DbConfig;
pub use error::ApiError;
pub use registry::{TableDescriptor, TableRegistry, TABLES};
pub use routes::{common_routes, entity_routes};
pub use service::CrudService;
pub use state::AppState;
