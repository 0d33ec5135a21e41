//! Report periods and their date windows.
//!
//! Every window is inclusive on both ends and is computed from "today" in the
//! shop's time zone. Each period has its own window function so adding a
//! variant forces a decision here.

use chrono::{Datelike, Days, Months, NaiveDate};

use super::error::ReportError;

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window from `start` to `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvertedRange` if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if end < start {
            return Err(ReportError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day in the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day in the window.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Reporting bucket selected on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportPeriod {
    /// Same calendar month as today.
    CurrentMonth,
    /// The calendar month before this one.
    LastMonth,
    /// First day of the month two months back, through today.
    LastThreeMonths,
    /// First day of the month five months back, through today.
    LastSixMonths,
    /// January 1 through today.
    YearToDate,
    /// The whole previous calendar year.
    LastYear,
    /// A caller-supplied range; without one, nothing is filtered out.
    Custom(Option<DateWindow>),
}

impl ReportPeriod {
    /// Tag used by the dashboard for this period.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::CurrentMonth => "current-month",
            Self::LastMonth => "last-month",
            Self::LastThreeMonths => "last-3-months",
            Self::LastSixMonths => "last-6-months",
            Self::YearToDate => "year-to-date",
            Self::LastYear => "last-year",
            Self::Custom(_) => "custom",
        }
    }

    /// Window for this period as seen on `today`, or `None` when the period
    /// does not restrict dates.
    #[must_use]
    pub fn window(&self, today: NaiveDate) -> Option<DateWindow> {
        match self {
            Self::CurrentMonth => Some(current_month(today)),
            Self::LastMonth => Some(last_month(today)),
            Self::LastThreeMonths => Some(trailing_months(today, 3)),
            Self::LastSixMonths => Some(trailing_months(today, 6)),
            Self::YearToDate => Some(year_to_date(today)),
            Self::LastYear => Some(last_year(today)),
            Self::Custom(range) => *range,
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for ReportPeriod {
    type Err = ReportError;

    /// Parses a dashboard tag. `custom` parses to a custom period without a
    /// range; attach one with [`ReportPeriod::Custom`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current-month" => Ok(Self::CurrentMonth),
            "last-month" => Ok(Self::LastMonth),
            "last-3-months" => Ok(Self::LastThreeMonths),
            "last-6-months" => Ok(Self::LastSixMonths),
            "year-to-date" => Ok(Self::YearToDate),
            "last-year" => Ok(Self::LastYear),
            "custom" => Ok(Self::Custom(None)),
            _ => Err(ReportError::UnknownPeriod(s.to_string())),
        }
    }
}

fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn start_of_year(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.ordinal0()))
}

fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

fn current_month(today: NaiveDate) -> DateWindow {
    DateWindow {
        start: start_of_month(today),
        end: end_of_month(today),
    }
}

fn last_month(today: NaiveDate) -> DateWindow {
    let end = start_of_month(today).pred_opt().unwrap_or(NaiveDate::MIN);
    DateWindow {
        start: start_of_month(end),
        end,
    }
}

fn trailing_months(today: NaiveDate, months: u32) -> DateWindow {
    let start = start_of_month(today)
        .checked_sub_months(Months::new(months.saturating_sub(1)))
        .unwrap_or(NaiveDate::MIN);
    DateWindow { start, end: today }
}

fn year_to_date(today: NaiveDate) -> DateWindow {
    DateWindow {
        start: start_of_year(today),
        end: today,
    }
}

fn last_year(today: NaiveDate) -> DateWindow {
    let end = start_of_year(today).pred_opt().unwrap_or(NaiveDate::MIN);
    DateWindow {
        start: start_of_year(end),
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(period: ReportPeriod, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let w = period.window(today).unwrap();
        (w.start(), w.end())
    }

    #[test]
    fn test_current_month() {
        assert_eq!(
            window(ReportPeriod::CurrentMonth, date(2026, 10, 17)),
            (date(2026, 10, 1), date(2026, 10, 31))
        );
        assert_eq!(
            window(ReportPeriod::CurrentMonth, date(2028, 2, 10)),
            (date(2028, 2, 1), date(2028, 2, 29))
        );
    }

    #[test]
    fn test_last_month_rolls_over_year() {
        assert_eq!(
            window(ReportPeriod::LastMonth, date(2026, 1, 15)),
            (date(2025, 12, 1), date(2025, 12, 31))
        );
        assert_eq!(
            window(ReportPeriod::LastMonth, date(2026, 3, 31)),
            (date(2026, 2, 1), date(2026, 2, 28))
        );
    }

    #[rstest]
    #[case(ReportPeriod::LastThreeMonths, date(2026, 10, 17), date(2026, 8, 1))]
    #[case(ReportPeriod::LastThreeMonths, date(2026, 2, 3), date(2025, 12, 1))]
    #[case(ReportPeriod::LastSixMonths, date(2026, 10, 17), date(2026, 5, 1))]
    #[case(ReportPeriod::LastSixMonths, date(2026, 3, 31), date(2025, 10, 1))]
    fn test_trailing_months(
        #[case] period: ReportPeriod,
        #[case] today: NaiveDate,
        #[case] start: NaiveDate,
    ) {
        assert_eq!(window(period, today), (start, today));
    }

    #[test]
    fn test_year_to_date() {
        assert_eq!(
            window(ReportPeriod::YearToDate, date(2026, 10, 17)),
            (date(2026, 1, 1), date(2026, 10, 17))
        );
        assert_eq!(
            window(ReportPeriod::YearToDate, date(2026, 1, 1)),
            (date(2026, 1, 1), date(2026, 1, 1))
        );
    }

    #[test]
    fn test_last_year() {
        assert_eq!(
            window(ReportPeriod::LastYear, date(2026, 10, 17)),
            (date(2025, 1, 1), date(2025, 12, 31))
        );
    }

    #[test]
    fn test_custom_window() {
        let range = DateWindow::new(date(2026, 4, 1), date(2026, 6, 30)).unwrap();
        assert_eq!(
            ReportPeriod::Custom(Some(range)).window(date(2026, 10, 17)),
            Some(range)
        );
        assert_eq!(ReportPeriod::Custom(None).window(date(2026, 10, 17)), None);
    }

    #[test]
    fn test_inverted_custom_range_rejected() {
        let err = DateWindow::new(date(2026, 6, 30), date(2026, 4, 1)).unwrap_err();
        assert_eq!(err.error_code(), "INVERTED_RANGE");
    }

    #[test]
    fn test_single_day_window() {
        let w = DateWindow::new(date(2026, 4, 1), date(2026, 4, 1)).unwrap();
        assert!(w.contains(date(2026, 4, 1)));
        assert!(!w.contains(date(2026, 4, 2)));
        assert!(!w.contains(date(2026, 3, 31)));
    }

    #[test]
    fn test_tags_round_trip() {
        for period in [
            ReportPeriod::CurrentMonth,
            ReportPeriod::LastMonth,
            ReportPeriod::LastThreeMonths,
            ReportPeriod::LastSixMonths,
            ReportPeriod::YearToDate,
            ReportPeriod::LastYear,
            ReportPeriod::Custom(None),
        ] {
            assert_eq!(ReportPeriod::from_str(period.tag()).unwrap(), period);
            assert_eq!(period.to_string(), period.tag());
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            ReportPeriod::from_str("last-decade"),
            Err(ReportError::UnknownPeriod("last-decade".to_string()))
        );
    }
}
