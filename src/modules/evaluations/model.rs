pub use carrera_models::evaluations::*;
