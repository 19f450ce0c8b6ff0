pub use carrera_models::subjects::*;
