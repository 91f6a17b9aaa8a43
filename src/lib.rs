// Identity Catalog Library

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;

pub use catalog::{EntityKind, FieldMap, Record, ValidationError};
pub use config::Config;
pub use errors::{AppError, Result};
