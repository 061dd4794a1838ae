use crate::error::Result;
use crate::model::{Alignment, FontFace, Rgb};
use crate::surface::Surface;

use super::{Composer, RenderContext};

impl<S: Surface> Composer<'_, S> {
    pub fn draw_title(
        &mut self,
        ctx: RenderContext,
        title: &str,
        subtitle: Option<&str>,
    ) -> Result<RenderContext> {
        let l = self.layout;
        let ctx = self.ensure_space(ctx, l.title_height)?;

        self.surface.set_font(FontFace::Bold, l.fonts.title);
        self.surface.set_text_color(l.palette.primary);
        self.surface
            .text(title, l.margin, ctx.cursor_y + l.fonts.title, Alignment::Left);
        if let Some(subtitle) = subtitle.filter(|s| !s.trim().is_empty()) {
            self.surface.set_font(FontFace::Regular, l.fonts.subtitle);
            self.surface.set_text_color(l.palette.muted);
            self.surface.text(
                subtitle,
                l.margin,
                ctx.cursor_y + l.fonts.title + l.fonts.subtitle + 6.0,
                Alignment::Left,
            );
        }
        Ok(ctx.advance(l.title_height))
    }

    /// Bold heading with a rule underneath.
    pub fn draw_section_heading(&mut self, ctx: RenderContext, text: &str) -> Result<RenderContext> {
        let l = self.layout;
        let ctx = self.ensure_space(ctx, l.section_height)?;

        let baseline = ctx.cursor_y + l.section_height - 10.0;
        self.surface.set_font(FontFace::Bold, l.fonts.section);
        self.surface.set_text_color(l.palette.primary);
        self.surface.text(text, l.margin, baseline, Alignment::Left);

        self.surface.set_draw_color(l.palette.primary);
        self.surface.set_line_width(0.6);
        self.surface
            .line(l.margin, baseline + 4.0, ctx.page_width - l.margin, baseline + 4.0);
        Ok(ctx.advance(l.section_height))
    }

    /// One `label: value` line.
    pub fn draw_field(&mut self, ctx: RenderContext, label: &str, value: &str) -> Result<RenderContext> {
        let text = self.layout.palette.text;
        self.draw_field_colored(ctx, label, value, text)
    }

    pub fn draw_field_colored(
        &mut self,
        ctx: RenderContext,
        label: &str,
        value: &str,
        value_color: Rgb,
    ) -> Result<RenderContext> {
        let l = self.layout;
        let ctx = self.ensure_space(ctx, l.field_line_height)?;
        let baseline = ctx.cursor_y + l.field_line_height - 5.0;

        self.surface.set_font(FontFace::Bold, l.fonts.body);
        self.surface.set_text_color(l.palette.muted);
        self.surface.text(label, l.margin, baseline, Alignment::Left);

        self.surface.set_font(FontFace::Regular, l.fonts.body);
        self.surface.set_text_color(value_color);
        self.surface
            .text(value, l.margin + l.label_column_width, baseline, Alignment::Left);
        Ok(ctx.advance(l.field_line_height))
    }

    /// Vertical gap. Never breaks a page by itself; the next block decides.
    pub fn draw_spacer(&mut self, ctx: RenderContext, height: f32) -> RenderContext {
        ctx.advance(height)
    }
}
