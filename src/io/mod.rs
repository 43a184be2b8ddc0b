//! Input/output helpers.
//!
//! - CSV tables (`table`) and required-column checks (`schema`)
//! - typed record extraction (`ingest`)
//! - chart spec / rendered figure exports (`export`)

pub mod export;
pub mod ingest;
pub mod schema;
pub mod table;

pub use ingest::*;
pub use schema::validate;
pub use table::Table;
