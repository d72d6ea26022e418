use crate::deposit::{aggregate_deposits, generate_weekly_deposits, DepositEvent};
use crate::error::{Result, SavingsError};
use chrono::{Datelike, NaiveDate, Weekday};
use log::{debug, info, trace, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const DAYS_IN_YEAR: Decimal = dec!(365);

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReportEvent {
    BalanceSnapshot {
        date: NaiveDate,
        balance: Decimal,
    },
    MonthlyCapitalization {
        month: u32,
        year: i32,
        balance: Decimal,
        interest: Decimal,
    },
    FinalBalance {
        date: NaiveDate,
        balance: Decimal,
    },
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParameters {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate, // inclusive
    pub initial_balance: Decimal,
    pub annual_rate: Decimal, // as a fraction (i.e., 0.0425)
    pub deposits: Vec<DepositEvent>,
}

impl SimulationParameters {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        initial_balance: Decimal,
        annual_rate: Decimal,
        deposits: Vec<DepositEvent>,
    ) -> Result<Self> {
        if annual_rate < Decimal::ZERO {
            return Err(SavingsError::NegativeRate(annual_rate));
        }
        Ok(Self {
            start_date,
            end_date,
            initial_balance,
            annual_rate,
            deposits,
        })
    }

    /// Same parameters with `amount` deposited every `weekday` of the range.
    pub fn with_weekly_deposits(mut self, amount: Decimal, weekday: Weekday) -> Self {
        self.deposits.extend(generate_weekly_deposits(
            self.start_date,
            self.end_date,
            amount,
            weekday,
        ));
        self
    }
}

impl Default for SimulationParameters {
    /// $100 opening balance at 4.25%, $160 every Monday from 2025-05-25 to 2026-12-25.
    fn default() -> Self {
        let start_date = NaiveDate::from_ymd_opt(2025, 5, 25).unwrap();
        let end_date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        Self {
            start_date,
            end_date,
            initial_balance: dec!(100),
            annual_rate: dec!(0.0425),
            deposits: Vec::new(),
        }
        .with_weekly_deposits(dec!(160), Weekday::Mon)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct SimulationResult {
    pub final_balance: Decimal,
    pub trace: Vec<ReportEvent>,
    pub total_deposits: Decimal,
    pub total_interest: Decimal,
    /// interest accrued after the last month boundary, never added to the balance
    pub uncapitalized_interest: Decimal,
}

impl SimulationResult {
    pub fn snapshots(&self) -> impl Iterator<Item = &ReportEvent> {
        self.trace
            .iter()
            .filter(|e| matches!(e, ReportEvent::BalanceSnapshot { .. }))
    }

    pub fn capitalizations(&self) -> impl Iterator<Item = &ReportEvent> {
        self.trace
            .iter()
            .filter(|e| matches!(e, ReportEvent::MonthlyCapitalization { .. }))
    }
}

struct SimulationState {
    balance: Decimal,
    accrued_interest: Decimal,
    current_date: NaiveDate,
}

// Tuesdays in the first or third week, by fixed day-of-month bands
fn is_report_day(date: &NaiveDate) -> bool {
    if date.weekday() != Weekday::Tue {
        return false;
    }
    let day = date.day();
    (1..=7).contains(&day) || (15..=21).contains(&day)
}

// logs and yields None when a Decimal operation overflowed
fn checked(value: Option<Decimal>, what: &str, date: &NaiveDate) -> Option<Decimal> {
    if value.is_none() {
        warn!("{} overflowed on {}, stopping the simulation", what, date);
    }
    value
}

pub fn simulate(params: &SimulationParameters) -> SimulationResult {
    let deposits_by_date = aggregate_deposits(&params.deposits);
    let daily_rate = params.annual_rate / DAYS_IN_YEAR;

    let mut events: Vec<ReportEvent> = Vec::new();
    let mut total_deposits = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut state = SimulationState {
        balance: params.initial_balance,
        accrued_interest: Decimal::ZERO,
        current_date: params.start_date,
    };

    info!(
        "simulating {} to {}, opening balance ${}, annual rate {}",
        params.start_date, params.end_date, params.initial_balance, params.annual_rate
    );

    while state.current_date <= params.end_date {
        let today = state.current_date;

        if let Some(amount) = deposits_by_date.get(&today) {
            let Some(balance) = checked(state.balance.checked_add(*amount), "deposit", &today)
            else {
                break;
            };
            state.balance = balance;
            total_deposits = total_deposits.saturating_add(*amount);
            trace!("{} deposit {}, balance {}", today, amount, state.balance);
        }

        let Some(accrued) = checked(
            state
                .balance
                .checked_mul(daily_rate)
                .and_then(|daily| state.accrued_interest.checked_add(daily)),
            "interest accrual",
            &today,
        ) else {
            break;
        };
        state.accrued_interest = accrued;

        if is_report_day(&today) {
            events.push(ReportEvent::BalanceSnapshot {
                date: today,
                balance: state.balance,
            });
        }

        let next_day = today.succ_opt();
        let month_end = match next_day {
            Some(next) => next.month() != today.month(),
            None => true,
        };
        if month_end {
            let interest = state.accrued_interest;
            let Some(balance) =
                checked(state.balance.checked_add(interest), "capitalization", &today)
            else {
                break;
            };
            state.balance = balance;
            total_interest = total_interest.saturating_add(interest);
            debug!(
                "capitalized {} for {:02}/{}, balance {}",
                interest,
                today.month(),
                today.year(),
                state.balance
            );
            events.push(ReportEvent::MonthlyCapitalization {
                month: today.month(),
                year: today.year(),
                balance: state.balance,
                interest,
            });
            state.accrued_interest = Decimal::ZERO;
        }

        match next_day {
            Some(next) => state.current_date = next,
            None => break,
        }
    }

    if !state.accrued_interest.is_zero() {
        debug!(
            "dropping {} interest accrued after the last month end",
            state.accrued_interest
        );
    }

    events.push(ReportEvent::FinalBalance {
        date: params.end_date,
        balance: state.balance,
    });

    SimulationResult {
        final_balance: state.balance,
        trace: events,
        total_deposits,
        total_interest,
        uncapitalized_interest: state.accrued_interest,
    }
}
