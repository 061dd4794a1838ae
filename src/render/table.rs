use crate::error::Result;
use crate::format::{format_currency, format_date};
use crate::model::{Alignment, AmortizationRow, CellValue, FontFace};
use crate::surface::Surface;

use super::{Composer, RenderContext};

/// Header labels for an amortization schedule. The due-date column is decided
/// once, from the first row, and applies to the whole schedule.
pub fn amortization_columns(rows: &[AmortizationRow]) -> Vec<&'static str> {
    if has_due_dates(rows) {
        vec!["Month", "Due Date", "EMI", "Principal", "Interest", "Balance"]
    } else {
        vec!["Month", "EMI", "Principal", "Interest", "Balance"]
    }
}

fn has_due_dates(rows: &[AmortizationRow]) -> bool {
    rows.first()
        .and_then(|r| r.due_date.as_deref())
        .is_some_and(|d| !d.trim().is_empty())
}

impl<S: Surface> Composer<'_, S> {
    /// Header band plus striped rows, breaking pages per row and repeating the
    /// header at the top of every continuation page. Cells are stringified as
    /// given; extra or missing cells are drawn as they come.
    pub fn render_table(
        &mut self,
        ctx: RenderContext,
        columns: &[String],
        rows: &[Vec<CellValue>],
    ) -> Result<RenderContext> {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        self.draw_table(ctx, columns, &cells)
    }

    /// Amortization schedule with money columns formatted as currency and
    /// ISO due dates shown as `DD-MM-YYYY`.
    pub fn render_amortization_table(
        &mut self,
        ctx: RenderContext,
        rows: &[AmortizationRow],
    ) -> Result<RenderContext> {
        let with_due_date = has_due_dates(rows);
        let columns: Vec<String> = amortization_columns(rows)
            .into_iter()
            .map(str::to_string)
            .collect();
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(columns.len());
                cells.push(row.month.to_string());
                if with_due_date {
                    cells.push(format_date(row.due_date.as_deref().unwrap_or("")));
                }
                cells.push(format_currency(row.emi));
                cells.push(format_currency(row.principal));
                cells.push(format_currency(row.interest));
                cells.push(format_currency(row.balance));
                cells
            })
            .collect();
        self.draw_table(ctx, &columns, &cells)
    }

    fn draw_table(
        &mut self,
        ctx: RenderContext,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> Result<RenderContext> {
        if columns.is_empty() {
            return Ok(ctx);
        }
        let l = self.layout;
        let col_w = (ctx.page_width - 2.0 * l.margin) / columns.len() as f32;

        // Keep the header with at least its first row.
        let mut ctx = self.ensure_space(ctx, l.header_row_height + l.row_height)?;
        ctx = self.draw_header_band(ctx, columns, col_w);

        for (index, row) in rows.iter().enumerate() {
            ctx = self.ensure_space(ctx, l.row_height)?;
            if ctx.cursor_y == l.page_top_start {
                log::debug!(
                    "table continues on page {} at row {index}; repeating header",
                    self.surface.current_page()
                );
                ctx = self.draw_header_band(ctx, columns, col_w);
            }

            // Parity follows the logical row index, not the position on the page.
            if index % 2 == 0 {
                self.surface.set_fill_color(l.palette.stripe);
                self.surface
                    .fill_rect(l.margin, ctx.cursor_y, col_w * columns.len() as f32, l.row_height);
            }

            self.surface.set_font(FontFace::Regular, l.fonts.table_body);
            self.surface.set_text_color(l.palette.text);
            let baseline = ctx.cursor_y + l.row_height / 2.0 + l.fonts.table_body * 0.35;
            for (col, cell) in row.iter().enumerate() {
                let x = l.margin + col as f32 * col_w + l.cell_padding;
                self.surface.text(cell, x, baseline, Alignment::Left);
            }
            ctx = ctx.advance(l.row_height);
        }

        Ok(ctx)
    }

    fn draw_header_band(&mut self, ctx: RenderContext, columns: &[String], col_w: f32) -> RenderContext {
        let l = self.layout;
        self.surface.set_fill_color(l.palette.table_header_fill);
        self.surface.fill_rect(
            l.margin,
            ctx.cursor_y,
            col_w * columns.len() as f32,
            l.header_row_height,
        );

        self.surface.set_font(FontFace::Bold, l.fonts.table_header);
        self.surface.set_text_color(l.palette.table_header_text);
        let baseline = ctx.cursor_y + l.header_row_height / 2.0 + l.fonts.table_header * 0.35;
        for (col, label) in columns.iter().enumerate() {
            let x = l.margin + col as f32 * col_w + l.cell_padding;
            self.surface.text(label, x, baseline, Alignment::Left);
        }
        ctx.advance(l.header_row_height)
    }
}
