//! # Carrera CLI
//!
//! Administrative operations used by the `carrera-cli` binary.
//!
//! - [`accounts`]: create student accounts without going through the API
//! - [`catalog`]: faculty and career reference data
//! - [`plans`]: import a study plan CSV on behalf of a user
//!
//! ## Usage
//!
//! ```ignore
//! use carrera_cli::catalog::seed_catalog;
//!
//! let report = seed_catalog(&pool, &std::fs::read("catalog.csv")?).await?;
//! println!("{} careers created", report.careers_created);
//! ```

pub mod accounts;
pub mod catalog;
pub mod plans;
