//! # Carrera Auth
//!
//! Authentication types and JWT utilities for the Carrera API.
//!
//! - [`claims`]: JWT claim structure for access tokens
//! - [`jwt`]: Token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use carrera_auth::{create_access_token, verify_token};
//! use carrera_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "ana", "ana@example.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
