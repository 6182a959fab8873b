//! Pay calendar generation.
//!
//! This module turns an anchor pay date and a cadence into the ordered pay
//! periods of a calendar year. A period's labor range may start in the prior
//! year; pay periods and calendar years are not expected to line up.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::models::{PayCadence, PayPeriod};

/// Upper bound on generated periods; a weekly cadence gives at most 53 per year.
const MAX_PERIODS_PER_YEAR: u32 = 60;

/// Generates the pay periods whose pay date falls in `year`.
///
/// The anchor is moved to the same month and day inside `year` (29 February
/// becomes 28 February in common years), then pay dates are emitted at
/// `anchor + n × step` until one leaves the year. The first period's labor
/// range is the nominal length before its pay date; every later period starts
/// on the previous pay date, so the periods are contiguous.
///
/// Pay dates earlier in `year` than the anchor's month and day are not
/// generated. An anchor of 20 December yields a single December period for
/// any year, so callers should pass an anchor that falls early in the target
/// year (the first pay date of that year is the natural choice).
///
/// Returns an empty calendar when `year` cannot be represented.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::generate_calendar;
/// use accrual_engine::models::PayCadence;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
/// let periods = generate_calendar(anchor, PayCadence::Biweekly, 2025);
///
/// assert_eq!(periods.len(), 26);
/// assert_eq!(periods[0].work_start, NaiveDate::from_ymd_opt(2024, 12, 19).unwrap());
/// assert_eq!(periods[0].work_end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// assert_eq!(periods[25].pay_date, NaiveDate::from_ymd_opt(2025, 12, 18).unwrap());
/// ```
pub fn generate_calendar(anchor_pay_date: NaiveDate, cadence: PayCadence, year: i32) -> Vec<PayPeriod> {
    let Some(anchor) = normalize_anchor(anchor_pay_date, year) else {
        return Vec::new();
    };

    let mut periods: Vec<PayPeriod> = Vec::new();
    for n in 0..MAX_PERIODS_PER_YEAR {
        let Some(pay_date) = cadence.pay_date_at(anchor, n) else {
            break;
        };
        if pay_date.year() != year {
            break;
        }

        let work_start = match periods.last() {
            Some(previous) => Some(previous.pay_date),
            None => cadence.work_start_for(pay_date),
        };
        let (Some(work_start), Some(work_end)) = (work_start, pay_date.checked_sub_days(Days::new(1)))
        else {
            break;
        };

        periods.push(PayPeriod::new(n + 1, work_start, work_end, pay_date, cadence));
    }

    debug!(
        anchor = %anchor_pay_date,
        cadence = %cadence,
        year,
        periods = periods.len(),
        "Generated pay calendar"
    );

    periods
}

/// Moves `anchor` to the same month and day inside `year`.
fn normalize_anchor(anchor: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, anchor.month(), anchor.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, anchor.month(), anchor.day() - 1))
}

/// Returns the smallest `n` such that the `n`-th pay date from `anchor` is on
/// or after `date`.
pub(crate) fn first_pay_index_on_or_after(
    cadence: PayCadence,
    anchor: NaiveDate,
    date: NaiveDate,
) -> u32 {
    if date <= anchor {
        return 0;
    }

    // Start just below the answer and walk forward.
    let mut n = match cadence.step_days() {
        Some(step) => {
            let days = u64::try_from((date - anchor).num_days()).unwrap_or(0);
            u32::try_from(days / step).unwrap_or(u32::MAX)
        }
        None => {
            let months = (date.year() - anchor.year()) * 12 + date.month() as i32
                - anchor.month() as i32;
            u32::try_from(months - 1).unwrap_or(0)
        }
    };
    while cadence
        .pay_date_at(anchor, n)
        .is_some_and(|pay_date| pay_date < date)
    {
        n += 1;
    }
    n
}
