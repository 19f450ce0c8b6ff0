pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::{init_evaluations_router, init_subject_evaluations_router};
