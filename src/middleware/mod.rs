//! Middleware modules for request processing.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. The [`auth::AuthUser`] extractor validates the JWT and extracts claims
//! 3. Handlers call [`role::check_any_role`] where a mutation requires an
//!    administrative role
//! 4. Handler executes if all checks pass

pub mod auth;
pub mod role;
