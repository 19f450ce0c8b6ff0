pub use carrera_models::catalog::*;
