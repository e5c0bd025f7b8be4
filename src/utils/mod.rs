//! Utility functions shared by the service and the admin CLI.
//!
//! - [`code_generator`] - Short code derivation from a long URL
//! - [`url_validator`] - Long URL validation

pub mod code_generator;
pub mod url_validator;
