use crate::amortization::{generate_schedule, parse_iso_date, schedule_totals};
use crate::error::{Error, Result};
use crate::format::{format_currency, format_date, format_months, format_optional_date, format_rate};
use crate::model::LoanSummary;
use crate::render::Composer;
use crate::surface::Surface;

fn validate(summary: &LoanSummary) -> Result<()> {
    if !summary.principal.is_finite() || summary.principal <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "principal must be positive, got {}",
            summary.principal
        )));
    }
    if !summary.annual_rate.is_finite() || summary.annual_rate < 0.0 {
        return Err(Error::InvalidInput(format!(
            "annual rate must be zero or positive, got {}",
            summary.annual_rate
        )));
    }
    if summary.tenure_months == 0 {
        return Err(Error::InvalidInput("tenure must be at least one month".into()));
    }
    Ok(())
}

/// Single page of loan terms and repayment totals. With the default layout the
/// content always fits one page and the footer is drawn directly as
/// `Page 1 of 1`; a layout override that pushes it further falls back to the
/// patch pass so every page still carries the final count.
pub fn compose_summary<S: Surface>(composer: &mut Composer<'_, S>, summary: &LoanSummary) -> Result<()> {
    validate(summary)?;

    let start = summary.start_date.as_deref().and_then(parse_iso_date);
    if start.is_none() && summary.start_date.is_some() {
        log::warn!("unparseable start date in loan summary; due dates omitted");
    }
    let schedule = generate_schedule(
        summary.principal,
        summary.annual_rate,
        summary.tenure_months,
        start,
    );
    let totals = schedule_totals(&schedule);
    let emi = schedule.first().map(|r| r.emi).unwrap_or_default();
    let last_due = schedule.last().and_then(|r| r.due_date.as_deref());
    let first_due = schedule.first().and_then(|r| r.due_date.as_deref());

    composer.render_page_base(1, 0);
    let gap = composer.layout().block_gap;
    let mut ctx = composer.start();
    ctx = composer.draw_title(ctx, "Loan Summary", Some(&summary.borrower))?;

    ctx = composer.draw_section_heading(ctx, "Loan Terms")?;
    ctx = composer.draw_field(ctx, "Borrower", &summary.borrower)?;
    if let Some(id) = summary.loan_id.as_deref() {
        ctx = composer.draw_field(ctx, "Loan ID", id)?;
    }
    ctx = composer.draw_field(ctx, "Principal", &format_currency(summary.principal))?;
    ctx = composer.draw_field(ctx, "Interest rate", &format_rate(summary.annual_rate))?;
    ctx = composer.draw_field(ctx, "Tenure", &format_months(summary.tenure_months))?;
    ctx = composer.draw_field(
        ctx,
        "Start date",
        &format_optional_date(summary.start_date.as_deref()),
    )?;

    ctx = composer.draw_spacer(ctx, gap);
    ctx = composer.draw_section_heading(ctx, "Repayment")?;
    ctx = composer.draw_field(ctx, "Monthly EMI", &format_currency(emi))?;
    ctx = composer.draw_field(ctx, "Total interest", &format_currency(totals.total_interest))?;
    ctx = composer.draw_field(ctx, "Total payable", &format_currency(totals.total_payable))?;
    ctx = composer.draw_field(ctx, "First due date", &format_date(first_due.unwrap_or("")))?;
    composer.draw_field(ctx, "Last due date", &format_date(last_due.unwrap_or("")))?;

    let pages = composer.surface().page_count();
    if pages == 1 {
        composer.draw_footer(1, 1);
    } else {
        log::warn!("loan summary spilled onto {pages} pages; patching footers");
        composer.finalize_footers()?;
    }

    log::debug!(
        "loan summary for '{}': emi={emi:.2} over {} months",
        summary.borrower,
        summary.tenure_months
    );
    Ok(())
}
