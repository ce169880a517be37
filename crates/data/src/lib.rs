//! Input files, key parsing and run summaries.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
