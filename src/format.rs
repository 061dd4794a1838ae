//! Display formatting for money, rates and dates. Deterministic and independent
//! of the host locale.

pub const CURRENCY_PREFIX: &str = "Rs.";

/// Shown in place of a missing or empty date.
pub const MISSING_DATE: &str = "--";

/// `1234.5` -> `"Rs. 1,234.50"`. Indian digit grouping (`1,23,45,678.00`),
/// exactly two decimals, halves rounded away from zero. Non-finite input is
/// shown as zero.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{CURRENCY_PREFIX} {sign}{}.{:02}",
        group_digits(cents / 100),
        cents % 100
    )
}

/// Last three digits, then pairs.
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    groups.push(head);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// `"2024-03-05"` -> `"05-03-2024"`. Empty input gives [`MISSING_DATE`];
/// anything that is not three numeric dash-separated parts is returned as is.
pub fn format_date(iso: &str) -> String {
    let trimmed = iso.trim();
    if trimmed.is_empty() {
        return MISSING_DATE.to_string();
    }
    let parts: Vec<&str> = trimmed.split('-').collect();
    match parts.as_slice() {
        [year, month, day]
            if [year, month, day]
                .iter()
                .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit())) =>
        {
            format!("{day}-{month}-{year}")
        }
        _ => iso.to_string(),
    }
}

pub fn format_optional_date(iso: Option<&str>) -> String {
    format_date(iso.unwrap_or(""))
}

/// `12.5` -> `"12.50% p.a."`
pub fn format_rate(annual_rate: f64) -> String {
    format!("{annual_rate:.2}% p.a.")
}

pub fn format_months(months: u32) -> String {
    match months {
        1 => "1 month".to_string(),
        n => format!("{n} months"),
    }
}
