//! Reducing-balance EMI schedules.

use chrono::{Months, NaiveDate};

use crate::model::AmortizationRow;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Equated monthly instalment for `annual_rate` percent per annum.
/// A zero rate spreads the principal evenly; a zero tenure has no instalment.
pub fn monthly_emi(principal: f64, annual_rate: f64, tenure_months: u32) -> f64 {
    if tenure_months == 0 {
        return 0.0;
    }
    let n = tenure_months as f64;
    let r = annual_rate / 1200.0;
    if r.abs() < f64::EPSILON {
        return principal / n;
    }
    let factor = (1.0 + r).powf(n);
    principal * r * factor / (factor - 1.0)
}

/// One row per month. Amounts are rounded to cents per row and the final
/// month absorbs the rounding drift so the balance closes at zero. Due dates
/// fall `month` calendar months after `start` (clamped to month end).
pub fn generate_schedule(
    principal: f64,
    annual_rate: f64,
    tenure_months: u32,
    start: Option<NaiveDate>,
) -> Vec<AmortizationRow> {
    let emi = round2(monthly_emi(principal, annual_rate, tenure_months));
    let r = annual_rate / 1200.0;
    let mut balance = round2(principal);

    (1..=tenure_months)
        .map(|month| {
            let interest = round2(balance * r);
            let mut principal_part = round2(emi - interest);
            let mut payment = emi;
            if month == tenure_months || principal_part > balance {
                principal_part = balance;
                payment = round2(principal_part + interest);
            }
            balance = round2(balance - principal_part);

            let due_date = start
                .and_then(|d| d.checked_add_months(Months::new(month)))
                .map(|d| d.format("%Y-%m-%d").to_string());

            AmortizationRow {
                month,
                due_date,
                emi: payment,
                principal: principal_part,
                interest,
                balance,
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScheduleTotals {
    pub total_interest: f64,
    pub total_payable: f64,
}

pub fn schedule_totals(rows: &[AmortizationRow]) -> ScheduleTotals {
    let (interest, payable) = rows
        .iter()
        .fold((0.0, 0.0), |(i, p), row| (i + row.interest, p + row.emi));
    ScheduleTotals {
        total_interest: round2(interest),
        total_payable: round2(payable),
    }
}
