//! # Carrera Config
//!
//! Configuration types for the Carrera API, loaded from environment variables.
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`import`]: CSV plan import policies and upload limits
//! - [`calendar`]: Upcoming-evaluations calendar window
//! - [`server`]: Listen address
//!
//! # Example
//!
//! ```ignore
//! use carrera_config::{CalendarConfig, CorsConfig, ImportConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let import_config = ImportConfig::from_env();
//! ```

pub mod calendar;
pub mod cors;
pub mod import;
pub mod jwt;
pub mod server;

pub use calendar::CalendarConfig;
pub use cors::CorsConfig;
pub use import::{DuplicatePolicy, HeaderPolicy, ImportConfig, ImportMode};
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back on absence or parse failure.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
