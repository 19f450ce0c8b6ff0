//! # Carrera Core
//!
//! Core types, errors, and utilities for the Carrera API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Deserialization helpers for browser form input
//!
//! # Example
//!
//! ```ignore
//! use carrera_core::errors::AppError;
//! use carrera_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Subject not found"));
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
