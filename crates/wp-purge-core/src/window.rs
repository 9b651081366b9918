use chrono::{DateTime, Duration, Utc};

use crate::config::GeneralConfig;
use crate::{Error, Result};

/// Timestamp format accepted by the `after`/`before` post filters
pub const API_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// How old a post must be before it is purged, and how many days are swept per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub threshold_days: u32,
    pub window_days: u32,
}

impl RetentionPolicy {
    pub fn new(threshold_days: u32, window_days: u32) -> Self {
        Self {
            threshold_days,
            window_days,
        }
    }

    /// Window of publish dates eligible for deletion at `now`
    ///
    /// end = now - threshold, start = end - window length. Fails when either bound
    /// falls outside the representable date range.
    pub fn window_at(&self, now: DateTime<Utc>) -> Result<DateWindow> {
        let end = days_before(now, self.threshold_days)?;
        let start = days_before(end, self.window_days)?;
        Ok(DateWindow { start, end })
    }
}

fn days_before(at: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>> {
    Duration::try_days(i64::from(days))
        .and_then(|offset| at.checked_sub_signed(offset))
        .ok_or_else(|| Error::Config(format!("{} days before {} is out of range", days, at)))
}

impl From<&GeneralConfig> for RetentionPolicy {
    fn from(general: &GeneralConfig) -> Self {
        Self::new(general.old_posts_day_threshold, general.delete_days_count)
    }
}

/// Closed range of post publish dates, in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// `after` query value
    pub fn after_param(&self) -> String {
        self.start.format(API_DATE_FORMAT).to_string()
    }

    /// `before` query value
    pub fn before_param(&self) -> String {
        self.end.format(API_DATE_FORMAT).to_string()
    }
}
