pub mod calendar;
pub mod controller;
pub mod model;
pub mod progress;
pub mod router;
pub mod service;

pub use router::init_dashboard_router;
