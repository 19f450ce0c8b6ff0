//! Request extractors for authentication.
//!
//! Handlers that need a logged-in student take an [`auth::AuthUser`]
//! argument; a missing or invalid `Authorization: Bearer <token>` header
//! rejects the request with 401 before the handler runs.

pub mod auth;
