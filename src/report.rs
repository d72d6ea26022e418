use crate::savings::ReportEvent;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

// rounded to cents for display only
fn cents(amt: &Decimal) -> Decimal {
    amt.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for ReportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEvent::BalanceSnapshot { date, balance } => write!(
                f,
                "[Balance {}] ${:.2}",
                date.format("%d/%m/%Y"),
                cents(balance)
            ),
            ReportEvent::MonthlyCapitalization {
                month,
                year,
                balance,
                interest,
            } => write!(
                f,
                "End of {:02}/{} - Balance: ${:.2} - Monthly interest: ${:.2}",
                month,
                year,
                cents(balance),
                cents(interest)
            ),
            ReportEvent::FinalBalance { date, balance } => write!(
                f,
                "Final balance on {}: ${:.2}",
                date.format("%d/%m/%Y"),
                cents(balance)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::savings::{simulate, ReportEvent, SimulationParameters};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use test_log::test;

    #[test]
    fn test_snapshot_line() {
        let event = ReportEvent::BalanceSnapshot {
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            balance: dec!(260),
        };
        assert_eq!(event.to_string(), "[Balance 03/06/2025] $260.00");
    }

    #[test]
    fn test_capitalization_line() {
        let event = ReportEvent::MonthlyCapitalization {
            month: 5,
            year: 2025,
            balance: dec!(260.19328767),
            interest: dec!(0.19328767),
        };
        assert_eq!(
            event.to_string(),
            "End of 05/2025 - Balance: $260.19 - Monthly interest: $0.19"
        );
    }

    #[test]
    fn test_final_line_rounds_half_up() {
        let event = ReportEvent::FinalBalance {
            date: NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
            balance: dec!(1234.125),
        };
        assert_eq!(event.to_string(), "Final balance on 25/12/2026: $1234.13");
    }

    #[test]
    fn test_reference_first_lines() {
        let result = simulate(&SimulationParameters::default());
        let lines: Vec<String> = result.trace.iter().map(|e| e.to_string()).collect();

        assert_eq!(
            lines[0],
            "End of 05/2025 - Balance: $260.19 - Monthly interest: $0.19"
        );
        assert_eq!(lines[1], "[Balance 03/06/2025] $420.19");
        assert!(lines
            .last()
            .unwrap()
            .starts_with("Final balance on 25/12/2026: $"));
    }
}
