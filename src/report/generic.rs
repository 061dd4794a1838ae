use crate::error::Result;
use crate::model::{GenericReport, ItemKind, ReportItem};
use crate::surface::Surface;

use crate::render::Composer;

/// Heading text when `item` is a section marker, `None` for a plain field.
///
/// Two markers are honoured: the structured `kind: "section"` and the older
/// convention of a label starting with `---`. The label convention is fragile
/// (a field whose label happens to start with dashes becomes a heading) and is
/// kept only so existing inputs render unchanged; new producers should set
/// `kind`.
pub fn section_title(item: &ReportItem) -> Option<&str> {
    if item.kind == ItemKind::Section || item.label.starts_with("---") {
        Some(item.label.trim_matches('-').trim())
    } else {
        None
    }
}

pub fn compose_generic<S: Surface>(composer: &mut Composer<'_, S>, report: &GenericReport) -> Result<()> {
    let page = composer.surface().current_page();
    composer.render_page_base(page, 0);

    let gap = composer.layout().block_gap;
    let mut ctx = composer.start();
    ctx = composer.draw_title(ctx, &report.title, report.subtitle.as_deref())?;

    for item in &report.items {
        ctx = match section_title(item) {
            Some(heading) => composer.draw_section_heading(ctx, heading)?,
            None => composer.draw_field(ctx, &item.label, &item.value.to_string())?,
        };
    }

    for table in &report.tables {
        ctx = composer.draw_spacer(ctx, gap);
        if let Some(title) = table.title.as_deref() {
            ctx = composer.draw_section_heading(ctx, title)?;
        }
        ctx = composer.render_table(ctx, &table.columns, &table.rows)?;
    }

    let pages = composer.finalize_footers()?;
    log::debug!("generic report '{}' composed on {pages} pages", report.title);
    Ok(())
}
