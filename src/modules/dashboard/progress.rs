//! Per-year approval percentages and the general average.

use std::collections::BTreeMap;

use carrera_models::subjects::{Subject, SubjectStatus};

use super::model::{YearProgress, YearProgressView};

pub const NO_DATA: &str = "no data";

/// Years up to this one always get a bucket, even when empty.
pub const FILLED_YEARS: i32 = 10;

/// One bucket per year that has subjects, plus an empty `percentage: None`
/// bucket for every missing year from 1 up to the highest year present,
/// capped at [`FILLED_YEARS`].
pub fn year_progress(subjects: &[Subject]) -> Vec<YearProgress> {
    let mut counts: BTreeMap<i32, (usize, usize)> = BTreeMap::new();
    for subject in subjects {
        let (approved, total) = counts.entry(subject.year).or_default();
        *total += 1;
        if subject.status == SubjectStatus::Approved {
            *approved += 1;
        }
    }

    if let Some(&max_year) = counts.keys().next_back() {
        for year in 1..=max_year.min(FILLED_YEARS) {
            counts.entry(year).or_default();
        }
    }

    counts
        .into_iter()
        .map(|(year, (approved, total))| YearProgress {
            year,
            approved,
            total,
            percentage: (total > 0).then(|| approved as f64 * 100.0 / total as f64),
        })
        .collect()
}

/// Unweighted mean of every final grade; `None` when no subject has one.
pub fn general_average(subjects: &[Subject]) -> Option<f64> {
    let grades: Vec<f64> = subjects.iter().filter_map(|s| s.final_grade).collect();
    if grades.is_empty() {
        return None;
    }
    Some(grades.iter().sum::<f64>() / grades.len() as f64)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `8` for 8.0, `7.5` for 7.5, `66.67` for 66.666…
pub fn format_number(value: f64) -> String {
    let formatted = format!("{:.2}", round2(value));
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

pub fn percentage_display(percentage: Option<f64>) -> String {
    match percentage {
        Some(value) => format!("{}%", format_number(value)),
        None => NO_DATA.to_string(),
    }
}

pub fn average_display(average: Option<f64>) -> String {
    average.map(format_number).unwrap_or_else(|| NO_DATA.to_string())
}

/// Attaches labels, display strings and the year's subjects to each bucket.
pub fn year_views(subjects: &[Subject]) -> Vec<YearProgressView> {
    let mut by_year: BTreeMap<i32, Vec<Subject>> = BTreeMap::new();
    for subject in subjects {
        by_year.entry(subject.year).or_default().push(subject.clone());
    }

    year_progress(subjects)
        .into_iter()
        .map(|mut progress| {
            progress.percentage = progress.percentage.map(round2);
            YearProgressView {
                label: format!("Year {}", progress.year),
                display: percentage_display(progress.percentage),
                subjects: by_year.remove(&progress.year).unwrap_or_default(),
                progress,
            }
        })
        .collect()
}
