pub use carrera_models::prerequisites::*;
