//! Configuration modules for the Learnroot API.
//!
//! Each submodule handles a specific aspect of configuration, typically
//! loaded from environment variables.
//!
//! # Modules
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL database connection pool initialization
//! - [`jwt`]: JWT authentication configuration

pub mod cors;
pub mod database;
pub mod jwt;
