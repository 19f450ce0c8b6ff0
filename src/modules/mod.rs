pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod evaluations;
pub mod imports;
pub mod prerequisites;
pub mod profiles;
pub mod subjects;
