//! Upcoming evaluations calendar.

use chrono::{Datelike, NaiveDate};

use super::model::{CalendarEntry, CalendarRow};

/// Keeps dated evaluations from `today` on, within `window_days` when given,
/// sorted by date, then subject name, then evaluation kind.
pub fn build_calendar(
    rows: Vec<CalendarRow>,
    today: NaiveDate,
    window_days: Option<u32>,
) -> Vec<CalendarEntry> {
    let mut entries: Vec<CalendarEntry> = rows
        .into_iter()
        .filter_map(|row| {
            let date = row.date?;
            let days_until = (date - today).num_days();
            if days_until < 0 {
                return None;
            }
            if window_days.is_some_and(|window| days_until > i64::from(window)) {
                return None;
            }

            Some(CalendarEntry {
                evaluation_id: row.evaluation_id,
                subject_id: row.subject_id,
                subject_name: row.subject_name,
                kind: row.kind,
                content: row.content,
                date,
                grade: row.grade,
                notes: row.notes,
                days_until,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.subject_name.cmp(&b.subject_name))
            .then_with(|| a.kind.cmp(&b.kind))
    });

    entries
}

/// Distinct calendar years of all dated evaluations, ascending.
pub fn evaluation_years(rows: &[CalendarRow]) -> Vec<i32> {
    let mut years: Vec<i32> = rows.iter().filter_map(|r| r.date).map(|d| d.year()).collect();
    years.sort_unstable();
    years.dedup();
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use carrera_models::evaluations::{ContentKind, EvaluationKind};
    use carrera_models::ids::{EvaluationId, SubjectId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(subject: &str, kind: EvaluationKind, on: Option<NaiveDate>) -> CalendarRow {
        CalendarRow {
            evaluation_id: EvaluationId::new(),
            subject_id: SubjectId::nil(),
            subject_name: subject.to_string(),
            kind,
            content: ContentKind::Theory,
            date: on,
            grade: None,
            notes: String::new(),
        }
    }

    #[test]
    fn test_filters_past_and_undated() {
        let today = date(2026, 5, 10);
        let rows = vec![
            row("Algebra", EvaluationKind::Partial, Some(date(2026, 5, 9))),
            row("Algebra", EvaluationKind::Makeup, None),
            row("Fisica", EvaluationKind::Partial, Some(today)),
        ];

        let calendar = build_calendar(rows, today, None);
        assert_eq!(calendar.len(), 1);
        assert_eq!(calendar[0].subject_name, "Fisica");
        assert_eq!(calendar[0].days_until, 0);
    }

    #[test]
    fn test_sorted_by_date_subject_and_kind() {
        let today = date(2026, 5, 10);
        let rows = vec![
            row("Quimica", EvaluationKind::Partial, Some(date(2026, 6, 1))),
            row("Fisica", EvaluationKind::Other, Some(date(2026, 5, 20))),
            row("Fisica", EvaluationKind::Partial, Some(date(2026, 5, 20))),
            row("Algebra", EvaluationKind::Assignment, Some(date(2026, 5, 20))),
            row("Algebra", EvaluationKind::Makeup, Some(date(2026, 5, 20))),
        ];

        let calendar = build_calendar(rows, today, None);
        let order: Vec<(&str, EvaluationKind)> = calendar
            .iter()
            .map(|e| (e.subject_name.as_str(), e.kind))
            .collect();

        assert_eq!(
            order,
            [
                ("Algebra", EvaluationKind::Makeup),
                ("Algebra", EvaluationKind::Assignment),
                ("Fisica", EvaluationKind::Partial),
                ("Fisica", EvaluationKind::Other),
                ("Quimica", EvaluationKind::Partial),
            ]
        );
        assert!(calendar.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_lookahead_window() {
        let today = date(2026, 5, 10);
        let rows = vec![
            row("A", EvaluationKind::Partial, Some(date(2026, 5, 17))),
            row("B", EvaluationKind::Partial, Some(date(2026, 5, 18))),
        ];

        assert_eq!(build_calendar(rows.clone(), today, Some(7)).len(), 1);
        assert_eq!(build_calendar(rows.clone(), today, Some(8)).len(), 2);
        assert_eq!(build_calendar(rows, today, Some(0)).len(), 0);
    }

    #[test]
    fn test_evaluation_years() {
        let rows = vec![
            row("A", EvaluationKind::Partial, Some(date(2027, 3, 1))),
            row("B", EvaluationKind::Partial, None),
            row("C", EvaluationKind::Partial, Some(date(2025, 11, 5))),
            row("D", EvaluationKind::Partial, Some(date(2027, 7, 9))),
        ];
        assert_eq!(evaluation_years(&rows), [2025, 2027]);
    }
}
