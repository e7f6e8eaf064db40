//! URL mapping repository implementations.
//!
//! - [`PgUrlMappingRepository`] - PostgreSQL storage via SQLx
//! - [`MemoryUrlMappingRepository`] - In-process storage for tests and local runs

pub mod memory_url_mapping_repository;
pub mod pg_url_mapping_repository;

pub use memory_url_mapping_repository::MemoryUrlMappingRepository;
pub use pg_url_mapping_repository::{MIGRATOR, PgUrlMappingRepository};
