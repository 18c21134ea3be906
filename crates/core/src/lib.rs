//! Domain logic shared by the persistence and HTTP layers.
//!
//! Everything here is plain Rust with no database or framework types:
//! the error taxonomy, catalog field validation, taxonomy name rules,
//! the test-drive state machine, and the blob sink abstraction.

pub mod blob;
pub mod catalog;
pub mod error;
pub mod roles;
pub mod taxonomy;
pub mod test_drive;
pub mod types;
