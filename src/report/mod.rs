//! Report assemblers. Each one walks its input top to bottom through the
//! [`Composer`] and leaves the finished pages on the surface.

mod generic;
mod group;
mod summary;

use crate::error::Result;
use crate::model::{GenericReport, GroupReport, LoanSummary};
use crate::render::layout::Layout;
use crate::render::{Assets, Composer};
use crate::surface::{Canvas, Document};

pub use generic::{compose_generic, section_title};
pub use group::{BALANCE_TOLERANCE, BalanceCheck, balance_check, compose_group, resolve_rate, slab_rate};
pub use summary::compose_summary;

fn render_with<F>(layout: &Layout, assets: &Assets, compose: F) -> Result<Document>
where
    F: FnOnce(&mut Composer<'_, Canvas>) -> Result<()>,
{
    let mut canvas = Canvas::new(layout.page_size());
    {
        let mut composer = Composer::new(&mut canvas, layout, assets);
        compose(&mut composer)?;
    }
    Ok(canvas.finish())
}

pub fn render_generic_report(layout: &Layout, assets: &Assets, report: &GenericReport) -> Result<Document> {
    render_with(layout, assets, |c| compose_generic(c, report))
}

pub fn render_group_report(layout: &Layout, assets: &Assets, report: &GroupReport) -> Result<Document> {
    render_with(layout, assets, |c| compose_group(c, report))
}

pub fn render_loan_summary(layout: &Layout, assets: &Assets, summary: &LoanSummary) -> Result<Document> {
    render_with(layout, assets, |c| compose_summary(c, summary))
}
