//! Period filtering of dated records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::error::ReportError;
use super::period::ReportPeriod;

/// Which timestamp of a record decides its period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateField {
    /// When the sale or purchase actually happened (may be back-dated).
    #[default]
    CaptureDate,
    /// When the record was created.
    CreatedAt,
}

/// A record that can be placed on the calendar.
pub trait Timestamped {
    /// Returns the requested timestamp, if the record carries it.
    fn timestamp(&self, field: DateField) -> Option<DateTime<Utc>>;

    /// The requested timestamp, falling back to the creation timestamp.
    fn effective_timestamp(&self, field: DateField) -> Option<DateTime<Utc>> {
        self.timestamp(field)
            .or_else(|| self.timestamp(DateField::CreatedAt))
    }
}

/// Filters records into report periods in a shop's time zone.
#[derive(Debug, Clone, Copy)]
pub struct PeriodFilter {
    tz: Tz,
}

impl Default for PeriodFilter {
    fn default() -> Self {
        Self::new(chrono_tz::Asia::Kolkata)
    }
}

impl PeriodFilter {
    /// Creates a filter for the given time zone.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Time zone used for calendar days.
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.tz
    }

    /// Calendar day of `instant` in the shop's time zone.
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Keeps the records whose effective date falls in `period`.
    ///
    /// Input order is preserved. Records without any timestamp are dropped,
    /// unless the period does not restrict dates, in which case every record
    /// is returned.
    pub fn filter<'a, T: Timestamped>(
        &self,
        records: &'a [T],
        period: &ReportPeriod,
        field: DateField,
        now: DateTime<Utc>,
    ) -> Vec<&'a T> {
        let Some(window) = period.window(self.local_date(now)) else {
            return records.iter().collect();
        };

        let kept: Vec<&T> = records
            .iter()
            .filter(|record| {
                record
                    .effective_timestamp(field)
                    .is_some_and(|ts| window.contains(self.local_date(ts)))
            })
            .collect();

        tracing::debug!(
            period = %period,
            start = %window.start(),
            end = %window.end(),
            total = records.len(),
            kept = kept.len(),
            "filtered records by period"
        );
        kept
    }

    /// Same as [`PeriodFilter::filter`] with the current time.
    pub fn filter_now<'a, T: Timestamped>(
        &self,
        records: &'a [T],
        period: &ReportPeriod,
        field: DateField,
    ) -> Vec<&'a T> {
        self.filter(records, period, field, Utc::now())
    }

    /// Filters by a dashboard tag. Unknown tags filter nothing out.
    pub fn filter_by_tag<'a, T: Timestamped>(
        &self,
        records: &'a [T],
        tag: &str,
        field: DateField,
        now: DateTime<Utc>,
    ) -> Vec<&'a T> {
        match tag.parse::<ReportPeriod>() {
            Ok(period) => self.filter(records, &period, field, now),
            Err(err) => {
                tracing::warn!(error = %err, "unrecognised period, returning all records");
                records.iter().collect()
            }
        }
    }

    /// Parses a record date as the API sends it.
    ///
    /// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` and
    /// bare `YYYY-MM-DD`; naive values are read in the shop's time zone.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::MalformedDate` for anything else.
    pub fn parse_record_date(&self, input: &str) -> Result<DateTime<Utc>, ReportError> {
        let trimmed = input.trim();
        let malformed = || ReportError::MalformedDate(input.to_string());

        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(instant.with_timezone(&Utc));
        }

        let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
            .or_else(|_| {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .map(|date| date.and_time(chrono::NaiveTime::MIN))
            })
            .map_err(|_| malformed())?;

        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(malformed)
    }
}
