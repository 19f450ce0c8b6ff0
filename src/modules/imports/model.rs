pub use carrera_models::imports::*;
