//! CatalogService: validated, transactional operations over authors and books.

mod catalog;
pub mod validation;
pub use catalog::CatalogService;
