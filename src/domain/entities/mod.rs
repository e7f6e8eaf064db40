//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation input
//! is kept in a separate struct ([`NewUrlMapping`]) so storage owns defaults
//! such as the initial visit counter.

pub mod url_mapping;

pub use url_mapping::{MappingField, NewUrlMapping, UrlMapping};
