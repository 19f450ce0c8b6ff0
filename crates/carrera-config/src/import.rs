//! CSV plan import configuration.
//!
//! # Environment Variables
//!
//! - `IMPORT_MAX_BYTES`: maximum upload size in bytes (default: 1 MiB)
//! - `IMPORT_HEADER_POLICY`: `auto`, `always` or `never` (default: `auto`)
//! - `IMPORT_DUPLICATE_POLICY`: `append` or `skip` (default: `append`)
//! - `IMPORT_MODE`: `best_effort` or `atomic` (default: `best_effort`)
//!
//! Each policy can also be overridden per upload.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::env_or;

/// How the first row of an uploaded plan is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// Skip the first row when neither its year nor its duration column parses.
    #[default]
    Auto,
    /// The first row is always a header.
    Always,
    /// There is no header; the first row is data.
    Never,
}

/// What happens to a row whose (year, name) already exists for the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Insert another subject with the same year and name.
    #[default]
    Append,
    /// Leave the existing subject untouched and count the row as skipped.
    Skip,
}

/// Commit behaviour when some rows fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Commit the valid rows and report the invalid ones.
    #[default]
    BestEffort,
    /// Any invalid row rolls back the whole batch.
    Atomic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownPolicy {}

impl FromStr for HeaderPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "skip" | "true" => Ok(Self::Always),
            "never" | "none" | "false" => Ok(Self::Never),
            _ => Err(UnknownPolicy {
                kind: "header policy",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "skip" => Ok(Self::Skip),
            _ => Err(UnknownPolicy {
                kind: "duplicate policy",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for ImportMode {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "best_effort" => Ok(Self::BestEffort),
            "atomic" => Ok(Self::Atomic),
            _ => Err(UnknownPolicy {
                kind: "import mode",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImportConfig {
    pub max_bytes: usize,
    pub header: HeaderPolicy,
    pub on_duplicate: DuplicatePolicy,
    pub mode: ImportMode,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            header: HeaderPolicy::default(),
            on_duplicate: DuplicatePolicy::default(),
            mode: ImportMode::default(),
        }
    }
}

impl ImportConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_bytes: env_or("IMPORT_MAX_BYTES", defaults.max_bytes),
            header: env_or("IMPORT_HEADER_POLICY", defaults.header),
            on_duplicate: env_or("IMPORT_DUPLICATE_POLICY", defaults.on_duplicate),
            mode: env_or("IMPORT_MODE", defaults.mode),
        }
    }
}
