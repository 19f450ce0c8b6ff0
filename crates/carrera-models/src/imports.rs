//! CSV study plan parsing.
//!
//! A plan file has one subject per line: `year,duration,name`. Parsing never
//! fails as a whole; every rejected line becomes a [`RowError`] carrying its
//! 1-based line number while the remaining lines keep being read.

use carrera_config::{DuplicatePolicy, HeaderPolicy, ImportConfig, ImportMode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::subjects::{Duration, NewSubject};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    pub line: u64,
    pub subject: NewSubject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RowError {
    pub line: u64,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ParsedPlan {
    pub rows: Vec<PlanRow>,
    pub errors: Vec<RowError>,
    pub header_skipped: bool,
}

/// Import policies for one upload, resolved from config and per-request overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOptions {
    pub header: HeaderPolicy,
    pub on_duplicate: DuplicatePolicy,
    pub mode: ImportMode,
}

impl From<&ImportConfig> for ImportOptions {
    fn from(config: &ImportConfig) -> Self {
        Self {
            header: config.header,
            on_duplicate: config.on_duplicate,
            mode: config.mode,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_duplicates: usize,
    pub header_skipped: bool,
    pub errors: Vec<RowError>,
    /// `false` when atomic mode rolled the batch back
    pub committed: bool,
    #[schema(value_type = String, example = "best_effort")]
    pub mode: ImportMode,
}

pub fn parse_plan(input: &[u8], header: HeaderPolicy) -> ParsedPlan {
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut plan = ParsedPlan::default();
    let mut seen_data = false;
    let mut last_line = 0;

    for result in reader.byte_records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(last_line + 1);
                plan.errors.push(RowError {
                    line,
                    message: format!("Unreadable row: {err}"),
                });
                break;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(last_line + 1);
        last_line = line;

        if record.iter().all(<[u8]>::is_empty) {
            continue;
        }

        let first = !seen_data;
        seen_data = true;

        if first {
            let skip = match header {
                HeaderPolicy::Always => true,
                HeaderPolicy::Never => false,
                HeaderPolicy::Auto => looks_like_header(&record),
            };
            if skip {
                plan.header_skipped = true;
                continue;
            }
        }

        match parse_record(&record) {
            Ok(subject) => plan.rows.push(PlanRow { line, subject }),
            Err(message) => plan.errors.push(RowError { line, message }),
        }
    }

    plan
}

fn parse_record(record: &csv::ByteRecord) -> Result<NewSubject, String> {
    let fields = record
        .iter()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| "Row is not valid UTF-8".to_string())?;

    if fields.len() != COLUMNS {
        return Err(format!(
            "Expected {COLUMNS} columns (year, duration, name), found {}",
            fields.len()
        ));
    }

    NewSubject::parse(fields[0], fields[1], fields[2]).map_err(|e| e.to_string())
}

/// A first row is a header when neither its year nor its duration parses.
fn looks_like_header(record: &csv::ByteRecord) -> bool {
    let text = |i: usize| record.get(i).map(String::from_utf8_lossy);

    let year_is_int = text(0).is_some_and(|y| y.parse::<i64>().is_ok());
    let duration_is_code = text(1).is_some_and(|d| d.parse::<Duration>().is_ok());

    !year_is_int && !duration_is_code
}
