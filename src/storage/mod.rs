//! Read access to the directory's SQLite database.
//!
//! The web application owns the data. This crate only needs the category
//! tree and the public websites; the write operations exist so the schema
//! can be seeded and so tests can build fixtures.

mod categories;
mod schema;
mod types;
mod websites;

pub use schema::Database;
pub use types::{Category, DatabaseError, NewWebsite, Website};
