use chrono::{Datelike, Days, NaiveDate, Weekday};
use log::trace;
use rust_decimal::Decimal;
use std::{collections::BTreeMap, fmt};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositEvent {
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl DepositEvent {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self { date, amount }
    }
}

impl fmt::Display for DepositEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deposit date {}, amount ${}", self.date, self.amount)
    }
}

/// Schedules `amount` on every `weekday` between `from` and `to`, both inclusive.
///
/// Returns an empty schedule when `from` is after `to`.
pub fn generate_weekly_deposits(
    from: NaiveDate,
    to: NaiveDate,
    amount: Decimal,
    weekday: Weekday,
) -> Vec<DepositEvent> {
    let mut deposits: Vec<DepositEvent> = Vec::new();

    // at most 6 steps forward to the first matching weekday
    let offset = (7 + weekday.num_days_from_monday() - from.weekday().num_days_from_monday()) % 7;
    let mut cursor = match from.checked_add_days(Days::new(offset.into())) {
        Some(date) => date,
        None => return deposits,
    };

    while cursor <= to {
        trace!("deposit {} scheduled on {}", amount, cursor);
        deposits.push(DepositEvent::new(cursor, amount));
        cursor = match cursor.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }
    deposits
}

/// Sums deposits by calendar date.
pub fn aggregate_deposits(deposits: &[DepositEvent]) -> BTreeMap<NaiveDate, Decimal> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for dep in deposits {
        *by_date.entry(dep.date).or_insert(Decimal::ZERO) += dep.amount;
    }
    by_date
}
