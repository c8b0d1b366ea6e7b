pub mod pagination;
pub use pagination::Pagination;
