//! Repository query functions. Each takes a connection borrowed from the caller's
//! transaction so the catalog service decides where commit happens.

pub mod authors;
pub mod books;
