//! Products API: CRUD over a single product resource, stored in a JSON file or PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod product;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, Backend};
pub use error::{AppError, ConfigError, StoreError};
pub use product::{Product, ProductFields};
pub use routes::{app, common_routes, product_routes};
pub use service::{CrudService, RequestValidator};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_products_table, JsonFileStore, PgProductStore, ProductStore};
