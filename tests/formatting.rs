use chrono::NaiveDate;
use lending_report_pdf::amortization::{generate_schedule, monthly_emi, schedule_totals};
use lending_report_pdf::format::{format_currency, format_date, format_months, format_rate};
use lending_report_pdf::model::CellValue;

#[test]
fn currency_uses_prefix_indian_grouping_and_two_decimals() {
    assert_eq!(format_currency(1234.5), "Rs. 1,234.50");
    assert_eq!(format_currency(0.0), "Rs. 0.00");
    assert_eq!(format_currency(999.0), "Rs. 999.00");
    assert_eq!(format_currency(100000.0), "Rs. 1,00,000.00");
    assert_eq!(format_currency(12345678.9), "Rs. 1,23,45,678.90");
    assert_eq!(format_currency(0.125), "Rs. 0.13");
}

#[test]
fn currency_edge_values() {
    assert_eq!(format_currency(-1234.5), "Rs. -1,234.50");
    assert_eq!(format_currency(-0.001), "Rs. 0.00");
    assert_eq!(format_currency(f64::NAN), "Rs. 0.00");
    assert_eq!(format_currency(f64::INFINITY), "Rs. 0.00");
}

#[test]
fn dates_are_reordered_or_passed_through() {
    assert_eq!(format_date("2024-03-05"), "05-03-2024");
    assert_eq!(format_date(" 2023-12-31 "), "31-12-2023");
    assert_eq!(format_date(""), "--");
    assert_eq!(format_date("   "), "--");
    assert_eq!(format_date("not-a-date"), "not-a-date");
    assert_eq!(format_date("05/03/2024"), "05/03/2024");
    assert_eq!(format_date("2024-03"), "2024-03");
    assert_eq!(format_date("2024-03-05-01"), "2024-03-05-01");
}

#[test]
fn rates_months_and_cells() {
    assert_eq!(format_rate(12.5), "12.50% p.a.");
    assert_eq!(format_months(1), "1 month");
    assert_eq!(format_months(36), "36 months");
    assert_eq!(CellValue::Integer(42).to_string(), "42");
    assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
    assert_eq!(CellValue::Empty.to_string(), "");
}

#[test]
fn cell_values_deserialize_untagged() {
    let cells: Vec<CellValue> = serde_json::from_str(r#"[1, 2.5, "x", null]"#).unwrap();
    assert_eq!(
        cells,
        vec![
            CellValue::Integer(1),
            CellValue::Number(2.5),
            CellValue::Text("x".into()),
            CellValue::Empty,
        ]
    );
}

#[test]
fn emi_matches_reducing_balance_formula() {
    assert_eq!((monthly_emi(100000.0, 12.0, 12) * 100.0).round() / 100.0, 8884.88);
    assert_eq!(monthly_emi(1200.0, 0.0, 12), 100.0);
    assert_eq!(monthly_emi(1200.0, 10.0, 0), 0.0);
}

#[test]
fn schedule_closes_at_zero_with_month_end_due_dates() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 31);
    let rows = generate_schedule(100000.0, 12.0, 12, start);

    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0].emi, 8884.88);
    assert_eq!(rows[0].interest, 1000.0);
    assert_eq!(rows[0].due_date.as_deref(), Some("2024-02-29"));
    assert_eq!(rows[11].due_date.as_deref(), Some("2025-01-31"));
    assert_eq!(rows[11].balance, 0.0);
    assert!(rows.windows(2).all(|w| w[0].balance > w[1].balance));

    let repaid: f64 = rows.iter().map(|r| r.principal).sum();
    assert!((repaid - 100000.0).abs() < 0.01, "repaid {repaid}");

    let totals = schedule_totals(&rows);
    assert!((totals.total_payable - totals.total_interest - 100000.0).abs() < 0.01);
}

#[test]
fn zero_rate_and_zero_tenure_schedules() {
    let flat = generate_schedule(1200.0, 0.0, 12, None);
    assert_eq!(flat.len(), 12);
    assert!(flat.iter().all(|r| r.emi == 100.0 && r.interest == 0.0));
    assert!(flat.iter().all(|r| r.due_date.is_none()));
    assert_eq!(flat[11].balance, 0.0);

    assert!(generate_schedule(5000.0, 10.0, 0, None).is_empty());
}
