//! Utility modules for the Learnroot API.
//!
//! This module contains shared utilities used throughout the application:
//!
//! - [`errors`]: Application error types and handling
//! - [`jwt`]: JWT token creation and verification
//! - [`password`]: Password hashing and verification
//! - [`response`]: The uniform `{success, message, data}` response envelope

pub mod errors;
pub mod jwt;
pub mod password;
pub mod response;
