//! Shared helpers for the feature modules.
//!
//! - [`ownership`]: 404/403 resolution for user-owned resources

pub mod ownership;
