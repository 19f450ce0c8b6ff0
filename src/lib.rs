//! # Carrera API
//!
//! A REST API built with Rust, Axum and PostgreSQL for students to track their
//! university plan: subjects per year, grades, evaluations and the
//! faculty/career they belong to.
//!
//! ## Overview
//!
//! - **Accounts**: registration with faculty and career, JWT bearer login
//! - **Subjects**: manual entry or bulk CSV import, status changes driven by
//!   the student (`not_started → in_progress → approved | failed`)
//! - **Evaluations**: partials, makeups and assignments with optional date and grade
//! - **Dashboard**: approval percentage per year, general average and an
//!   upcoming evaluations calendar
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Re-exported configuration types
//! ├── middleware/       # AuthUser extractor
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Register and login
//! │   ├── catalog/      # Faculties and careers
//! │   ├── profiles/     # Faculty/career of the current user
//! │   ├── subjects/     # Subject CRUD and status changes
//! │   ├── evaluations/  # Evaluations of a subject
//! │   ├── imports/      # CSV plan upload
//! │   ├── prerequisites/ # Prerequisite links between subjects
//! │   └── dashboard/    # Progress aggregation and calendar
//! └── utils/            # Ownership checks
//! ```
//!
//! Each feature module has `controller.rs` (handlers), `service.rs` (queries
//! and rules), `model.rs` (types, mostly re-exported from `carrera-models`)
//! and `router.rs`.
//!
//! ## Request bodies
//!
//! Write endpoints take `application/x-www-form-urlencoded` bodies, the plan
//! upload takes `multipart/form-data`. Responses are JSON. Blank form fields
//! are read as absent.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod config;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

pub use carrera_auth;
pub use carrera_config;
pub use carrera_core;
pub use carrera_db;
pub use carrera_models;
