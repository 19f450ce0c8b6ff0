//! Configuration types, loaded from environment variables by `from_env()`.
//!
//! See the `carrera-config` crate for variable names and defaults.

pub use carrera_config::{
    CalendarConfig, CorsConfig, DuplicatePolicy, HeaderPolicy, ImportConfig, ImportMode,
    JwtConfig, ServerConfig,
};
