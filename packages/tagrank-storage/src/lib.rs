pub mod memory;
pub mod models;
pub mod neo4j;
pub mod queries;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
