//! Quote selection policies.
//!
//! Date-based policies use the UTC calendar date so every deployment region
//! agrees on the quote of the day, and the index only changes at UTC midnight.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CardError, CardResult};

/// How a quote is picked from the fetched collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Uniformly random on every request.
    Random,
    /// `ordinal day of year mod count`.
    DayOfYear,
    /// `sum of code points of "YYYY-MM-DD" mod count`.
    ///
    /// A weak hash: different dates whose digit sums match map to the same
    /// index. Kept for parity with existing deployments.
    DateDigest,
}

impl SelectionPolicy {
    /// Whether the selection is stable for a whole calendar day.
    pub fn is_daily(&self) -> bool {
        !matches!(self, SelectionPolicy::Random)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionPolicy::Random => "random",
            SelectionPolicy::DayOfYear => "day_of_year",
            SelectionPolicy::DateDigest => "date_digest",
        }
    }
}

/// Pick an index into a collection of `count` quotes.
pub fn select_index<R>(
    policy: SelectionPolicy,
    count: usize,
    today: NaiveDate,
    rng: &mut R,
) -> CardResult<usize>
where
    R: Rng + ?Sized,
{
    if count == 0 {
        return Err(CardError::EmptyCollection);
    }

    Ok(match policy {
        SelectionPolicy::Random => rng.gen_range(0..count),
        SelectionPolicy::DayOfYear => day_of_year_index(today, count),
        SelectionPolicy::DateDigest => date_digest_index(today, count),
    })
}

/// 1-based ordinal day of the year, modulo `count`. `count` must be non-zero.
pub fn day_of_year_index(date: NaiveDate, count: usize) -> usize {
    date.ordinal() as usize % count
}

/// Code point sum of the ISO date string, modulo `count`. `count` must be
/// non-zero.
pub fn date_digest_index(date: NaiveDate, count: usize) -> usize {
    let key = date.format("%Y-%m-%d").to_string();
    let sum: usize = key.chars().map(|c| c as usize).sum();
    sum % count
}

/// Seconds left until the next UTC midnight, at least 1.
pub fn seconds_until_midnight(now: DateTime<Utc>) -> u64 {
    let elapsed = u64::from(now.time().num_seconds_from_midnight());
    (86_400 - elapsed.min(86_399)).max(1)
}
