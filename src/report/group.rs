use crate::amortization::{generate_schedule, monthly_emi, parse_iso_date};
use crate::error::Result;
use crate::format::{format_currency, format_months, format_optional_date, format_rate};
use crate::model::{CellValue, GroupReport, InterestSlab, Member, MemberLoan};
use crate::render::{Composer, RenderContext};
use crate::surface::Surface;

/// Reported and computed outstanding may differ by less than this and still
/// count as balanced (rounding across many instalments).
pub const BALANCE_TOLERANCE: f64 = 1.0;

const LOAN_COLUMNS: [&str; 7] = [
    "Loan", "Purpose", "Principal", "Rate", "Tenure", "EMI", "Outstanding",
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalanceCheck {
    pub total_disbursed: f64,
    pub expected_outstanding: f64,
    pub reported_outstanding: f64,
    pub difference: f64,
    pub balanced: bool,
}

pub fn balance_check(report: &GroupReport) -> BalanceCheck {
    let loans = report.members.iter().flat_map(|m| m.loans.iter());
    let (total_disbursed, expected_outstanding) = loans
        .fold((0.0, 0.0), |(d, o), loan| (d + loan.principal, o + loan.outstanding));
    let reported_outstanding = report.validation.reported_outstanding;
    let difference = reported_outstanding - expected_outstanding;
    BalanceCheck {
        total_disbursed,
        expected_outstanding,
        reported_outstanding,
        difference,
        balanced: difference.abs() < BALANCE_TOLERANCE,
    }
}

/// Rate of the highest slab whose threshold the amount reaches.
pub fn slab_rate(slabs: &[InterestSlab], amount: f64) -> Option<f64> {
    slabs
        .iter()
        .filter(|s| amount >= s.threshold)
        .max_by(|a, b| a.threshold.total_cmp(&b.threshold))
        .map(|s| s.annual_rate)
}

/// Loan's own rate, else the slab matching its outstanding amount (principal
/// for a loan with nothing recorded outstanding), else the group rate.
pub fn resolve_rate(report: &GroupReport, loan: &MemberLoan) -> f64 {
    let amount = if loan.outstanding > 0.0 {
        loan.outstanding
    } else {
        loan.principal
    };
    loan.annual_rate
        .or_else(|| slab_rate(&report.slabs, amount))
        .unwrap_or(report.terms.annual_rate)
}

fn resolve_tenure(report: &GroupReport, loan: &MemberLoan) -> u32 {
    loan.tenure_months.unwrap_or(report.terms.tenure_months)
}

fn loan_label(member: &Member, index: usize, loan: &MemberLoan) -> String {
    loan.loan_id
        .clone()
        .unwrap_or_else(|| format!("{}-{}", member.member_id.as_deref().unwrap_or("L"), index + 1))
}

pub fn compose_group<S: Surface>(composer: &mut Composer<'_, S>, report: &GroupReport) -> Result<()> {
    let page = composer.surface().current_page();
    composer.render_page_base(page, 0);

    let mut ctx = composer.start();
    let subtitle = match report.group_id.as_deref() {
        Some(id) => format!("{} ({id})", report.group_name),
        None => report.group_name.clone(),
    };
    ctx = composer.draw_title(ctx, "Group Loan Assessment", Some(&subtitle))?;

    ctx = draw_terms(composer, ctx, report)?;
    ctx = draw_slabs(composer, ctx, report)?;
    ctx = draw_members(composer, ctx, report)?;
    ctx = draw_validation(composer, ctx, report)?;
    if report.include_schedules {
        draw_schedules(composer, ctx, report)?;
    }

    let pages = composer.finalize_footers()?;
    log::debug!(
        "group report '{}' composed on {pages} pages (schedules={})",
        report.group_name,
        report.include_schedules
    );
    Ok(())
}

fn draw_terms<S: Surface>(
    composer: &mut Composer<'_, S>,
    ctx: RenderContext,
    report: &GroupReport,
) -> Result<RenderContext> {
    let terms = &report.terms;
    let loan_count: usize = report.members.iter().map(|m| m.loans.len()).sum();

    let mut ctx = composer.draw_section_heading(ctx, "Group Terms")?;
    ctx = composer.draw_field(ctx, "Group name", &report.group_name)?;
    if let Some(id) = report.group_id.as_deref() {
        ctx = composer.draw_field(ctx, "Group ID", id)?;
    }
    ctx = composer.draw_field(ctx, "Tenure", &format_months(terms.tenure_months))?;
    ctx = composer.draw_field(ctx, "Group interest rate", &format_rate(terms.annual_rate))?;
    if let Some(freq) = terms.meeting_frequency.as_deref() {
        ctx = composer.draw_field(ctx, "Meeting frequency", freq)?;
    }
    ctx = composer.draw_field(
        ctx,
        "Start date",
        &format_optional_date(terms.start_date.as_deref()),
    )?;
    ctx = composer.draw_field(ctx, "Members", &report.members.len().to_string())?;
    ctx = composer.draw_field(ctx, "Loans", &loan_count.to_string())?;
    Ok(ctx)
}

fn draw_slabs<S: Surface>(
    composer: &mut Composer<'_, S>,
    ctx: RenderContext,
    report: &GroupReport,
) -> Result<RenderContext> {
    let gap = composer.layout().block_gap;
    let ctx = composer.draw_spacer(ctx, gap);
    let ctx = composer.draw_section_heading(ctx, "Interest Slabs")?;
    if report.slabs.is_empty() {
        return composer.draw_field(ctx, "Slabs", "None; group rate applies to every loan");
    }

    let mut slabs: Vec<&InterestSlab> = report.slabs.iter().collect();
    slabs.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
    let columns = vec!["Outstanding from".to_string(), "Annual rate".to_string()];
    let rows: Vec<Vec<CellValue>> = slabs
        .iter()
        .map(|s| {
            vec![
                CellValue::Text(format_currency(s.threshold)),
                CellValue::Text(format_rate(s.annual_rate)),
            ]
        })
        .collect();
    composer.render_table(ctx, &columns, &rows)
}

fn draw_members<S: Surface>(
    composer: &mut Composer<'_, S>,
    ctx: RenderContext,
    report: &GroupReport,
) -> Result<RenderContext> {
    let gap = composer.layout().block_gap;
    let columns: Vec<String> = LOAN_COLUMNS.iter().map(|c| c.to_string()).collect();

    let mut ctx = composer.draw_spacer(ctx, gap);
    ctx = composer.draw_section_heading(ctx, "Member Loans")?;

    for member in &report.members {
        let name = match member.member_id.as_deref() {
            Some(id) => format!("{} ({id})", member.name),
            None => member.name.clone(),
        };
        ctx = composer.draw_field(ctx, "Member", &name)?;
        if member.loans.is_empty() {
            ctx = composer.draw_field(ctx, "Loans", "No active loans")?;
            ctx = composer.draw_spacer(ctx, gap / 2.0);
            continue;
        }

        let rows: Vec<Vec<CellValue>> = member
            .loans
            .iter()
            .enumerate()
            .map(|(i, loan)| {
                let rate = resolve_rate(report, loan);
                let tenure = resolve_tenure(report, loan);
                vec![
                    CellValue::Text(loan_label(member, i, loan)),
                    CellValue::Text(loan.purpose.clone().unwrap_or_default()),
                    CellValue::Text(format_currency(loan.principal)),
                    CellValue::Text(format!("{rate:.2}%")),
                    CellValue::Integer(tenure as i64),
                    CellValue::Text(format_currency(monthly_emi(loan.principal, rate, tenure))),
                    CellValue::Text(format_currency(loan.outstanding)),
                ]
            })
            .collect();
        ctx = composer.render_table(ctx, &columns, &rows)?;

        let disbursed: f64 = member.loans.iter().map(|l| l.principal).sum();
        let outstanding: f64 = member.loans.iter().map(|l| l.outstanding).sum();
        ctx = composer.draw_field(
            ctx,
            "Member total",
            &format!(
                "{} disbursed, {} outstanding",
                format_currency(disbursed),
                format_currency(outstanding)
            ),
        )?;
        ctx = composer.draw_spacer(ctx, gap / 2.0);
    }
    Ok(ctx)
}

fn draw_validation<S: Surface>(
    composer: &mut Composer<'_, S>,
    ctx: RenderContext,
    report: &GroupReport,
) -> Result<RenderContext> {
    let check = balance_check(report);
    let palette = composer.layout().palette.clone();
    let gap = composer.layout().block_gap;

    let mut ctx = composer.draw_spacer(ctx, gap);
    ctx = composer.draw_section_heading(ctx, "Balance Validation")?;
    ctx = composer.draw_field(ctx, "Total disbursed", &format_currency(check.total_disbursed))?;
    if let Some(reported) = report.validation.reported_disbursed {
        ctx = composer.draw_field(ctx, "Reported disbursed", &format_currency(reported))?;
        ctx = composer.draw_field(
            ctx,
            "Disbursement difference",
            &format_currency(reported - check.total_disbursed),
        )?;
    }
    ctx = composer.draw_field(
        ctx,
        "Expected outstanding",
        &format_currency(check.expected_outstanding),
    )?;
    ctx = composer.draw_field(
        ctx,
        "Reported outstanding",
        &format_currency(check.reported_outstanding),
    )?;
    ctx = composer.draw_field(ctx, "Difference", &format_currency(check.difference))?;
    let (status, color) = if check.balanced {
        ("Balanced", palette.positive)
    } else {
        ("Mismatch", palette.negative)
    };
    composer.draw_field_colored(ctx, "Status", status, color)
}

fn draw_schedules<S: Surface>(
    composer: &mut Composer<'_, S>,
    ctx: RenderContext,
    report: &GroupReport,
) -> Result<RenderContext> {
    let gap = composer.layout().block_gap;
    let mut ctx = composer.draw_spacer(ctx, gap);
    ctx = composer.draw_section_heading(ctx, "Repayment Schedules")?;

    for member in &report.members {
        for (i, loan) in member.loans.iter().enumerate() {
            let rate = resolve_rate(report, loan);
            let tenure = resolve_tenure(report, loan);
            let start_raw = loan.start_date.as_deref().or(report.terms.start_date.as_deref());
            let start = start_raw.and_then(|raw| {
                let parsed = parse_iso_date(raw);
                if parsed.is_none() {
                    log::warn!("unparseable start date '{raw}'; schedule drawn without due dates");
                }
                parsed
            });
            let schedule = generate_schedule(loan.principal, rate, tenure, start);

            ctx = composer.draw_spacer(ctx, gap / 2.0);
            ctx = composer.draw_section_heading(
                ctx,
                &format!("{}: {}", member.name, loan_label(member, i, loan)),
            )?;
            ctx = composer.draw_field(
                ctx,
                "Terms",
                &format!(
                    "{} at {} over {}",
                    format_currency(loan.principal),
                    format_rate(rate),
                    format_months(tenure)
                ),
            )?;
            ctx = composer.render_amortization_table(ctx, &schedule)?;
        }
    }
    Ok(ctx)
}
