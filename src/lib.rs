pub mod amortization;
mod error;
mod fonts;
pub mod format;
pub mod model;
mod pdf;
pub mod render;
pub mod report;
pub mod surface;

pub use error::{Error, Result};
pub use render::layout::Layout;
pub use render::{Assets, Composer, RenderContext};
pub use report::{render_generic_report, render_group_report, render_loan_summary};
pub use surface::{Canvas, Command, Document, ImageAsset, Page, Size, Surface};

use std::path::Path;
use std::time::Instant;

use model::{GenericReport, GroupReport, LoanSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    Generic,
    Group,
    Summary,
}

#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    pub layout: Layout,
    pub assets: Assets,
    /// Forces per-loan schedules into group reports regardless of the input flag.
    pub include_schedules: bool,
}

/// Parses `json` as the input of `kind` and renders it.
pub fn render_report_json(kind: ReportKind, json: &[u8], options: &RenderOptions) -> Result<Document> {
    let RenderOptions { layout, assets, .. } = options;
    match kind {
        ReportKind::Generic => {
            let report: GenericReport = serde_json::from_slice(json)?;
            render_generic_report(layout, assets, &report)
        }
        ReportKind::Group => {
            let mut report: GroupReport = serde_json::from_slice(json)?;
            report.include_schedules |= options.include_schedules;
            render_group_report(layout, assets, &report)
        }
        ReportKind::Summary => {
            let summary: LoanSummary = serde_json::from_slice(json)?;
            render_loan_summary(layout, assets, &summary)
        }
    }
}

pub fn convert_report_file(
    kind: ReportKind,
    input: &Path,
    output: &Path,
    options: &RenderOptions,
) -> Result<()> {
    let json = std::fs::read(input)?;
    convert_report_bytes(kind, &json, output, options)
}

pub fn convert_report_bytes(
    kind: ReportKind,
    input: &[u8],
    output: &Path,
    options: &RenderOptions,
) -> Result<()> {
    let t0 = Instant::now();

    let doc = render_report_json(kind, input, options)?;
    let t_render = t0.elapsed();

    let bytes = doc.to_pdf();
    let t_serialize = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, serialize={:.1}ms, write={:.1}ms, total={:.1}ms ({} pages, output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_serialize - t_render).as_secs_f64() * 1000.0,
        (t_total - t_serialize).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.page_count(),
        bytes.len(),
    );

    Ok(())
}
