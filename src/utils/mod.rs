//! Utility functions for short path generation and URL validation.
//!
//! - [`path_generator`] - Random short path generation and reserved segments
//! - [`url_validator`] - Long URL validation

pub mod path_generator;
pub mod url_validator;
