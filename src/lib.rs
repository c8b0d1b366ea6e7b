//! Library catalog: REST backend over authors and their books, stored in SQLite.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod repo;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use model::{Author, AuthorSnapshot, Book, Page, PageRequest};
pub use routes::{app, catalog_routes, ops_routes};
pub use service::CatalogService;
pub use settings::Settings;
pub use state::AppState;
pub use store::{connect, ensure_tables};
