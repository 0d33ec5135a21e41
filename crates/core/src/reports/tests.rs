//! Property-based tests for period filtering.
//!
//! - Property 1: Filtering preserves input order
//! - Property 2: Every kept record falls in the period window
//! - Property 3: Pass-through periods keep everything

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use super::filter::{DateField, PeriodFilter, Timestamped};
use super::period::{DateWindow, ReportPeriod};

#[derive(Debug, Clone)]
struct Stamp {
    seq: usize,
    at: Option<DateTime<Utc>>,
}

impl Timestamped for Stamp {
    fn timestamp(&self, field: DateField) -> Option<DateTime<Utc>> {
        match field {
            DateField::CaptureDate => None,
            DateField::CreatedAt => self.at,
        }
    }
}

/// Strategy for instants between 2020 and 2030.
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..1_893_456_000i64)
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
}

/// Strategy for records, some of them undated.
fn stamps() -> impl Strategy<Value = Vec<Stamp>> {
    prop::collection::vec(prop::option::weighted(0.9, instant()), 0..50).prop_map(|ats| {
        ats.into_iter()
            .enumerate()
            .map(|(seq, at)| Stamp { seq, at })
            .collect()
    })
}

fn period() -> impl Strategy<Value = ReportPeriod> {
    prop_oneof![
        Just(ReportPeriod::CurrentMonth),
        Just(ReportPeriod::LastMonth),
        Just(ReportPeriod::LastThreeMonths),
        Just(ReportPeriod::LastSixMonths),
        Just(ReportPeriod::YearToDate),
        Just(ReportPeriod::LastYear),
        (0u64..4000, 0u64..400).prop_map(|(offset, len)| {
            let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
            let start = base + Days::new(offset);
            ReportPeriod::Custom(DateWindow::new(start, start + Days::new(len)).ok())
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1: Kept records appear in input order.
    #[test]
    fn prop_filter_preserves_order(records in stamps(), period in period(), now in instant()) {
        let kept = PeriodFilter::default().filter(&records, &period, DateField::CaptureDate, now);
        let seqs: Vec<usize> = kept.iter().map(|s| s.seq).collect();
        let mut sorted = seqs.clone();
        sorted.sort_unstable();
        prop_assert_eq!(seqs, sorted);
    }

    /// Property 2: Every kept record's local date lies in the window, and
    /// every dated record inside the window is kept.
    #[test]
    fn prop_filter_matches_window(records in stamps(), period in period(), now in instant()) {
        let filter = PeriodFilter::default();
        let kept = filter.filter(&records, &period, DateField::CaptureDate, now);

        match period.window(filter.local_date(now)) {
            Some(window) => {
                for stamp in &kept {
                    let at = stamp.at.unwrap_or_default();
                    prop_assert!(stamp.at.is_some());
                    prop_assert!(window.contains(filter.local_date(at)));
                }
                let expected = records
                    .iter()
                    .filter(|s| s.at.is_some_and(|at| window.contains(filter.local_date(at))))
                    .count();
                prop_assert_eq!(kept.len(), expected);
            }
            None => prop_assert_eq!(kept.len(), records.len()),
        }
    }

    /// Property 3: A custom period without a range keeps every record.
    #[test]
    fn prop_custom_without_range_passes_through(records in stamps(), now in instant()) {
        let kept = PeriodFilter::default().filter(&records, &ReportPeriod::Custom(None), DateField::CaptureDate, now);
        prop_assert_eq!(kept.len(), records.len());
    }

    /// Windows never end before they start and always contain their start.
    #[test]
    fn prop_windows_are_well_formed(period in period(), now in instant()) {
        let today = PeriodFilter::default().local_date(now);
        if let Some(window) = period.window(today) {
            prop_assert!(window.start() <= window.end());
            prop_assert!(window.contains(window.start()));
        }
    }
}
