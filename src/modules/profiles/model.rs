pub use carrera_models::profiles::*;
