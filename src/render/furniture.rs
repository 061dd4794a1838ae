use crate::model::{Alignment, FontFace};
use crate::surface::Surface;

use super::Composer;

impl<S: Surface> Composer<'_, S> {
    /// Low-opacity mark centred on the page. An image watermark that cannot be
    /// decoded is dropped; without an image the branding text is used.
    pub fn draw_watermark(&mut self) {
        let size = self.surface.page_size();
        let l = self.layout;

        self.surface.save_state();
        self.surface.set_opacity(l.watermark_opacity);
        match &self.assets.watermark {
            Some(asset) => {
                let side = size.width.min(size.height) * 0.55;
                let x = (size.width - side) / 2.0;
                let y = (size.height - side) / 2.0;
                if let Err(e) = self.surface.image(asset, x, y, side, side) {
                    log::debug!("watermark skipped: {e}");
                }
            }
            None => {
                self.surface.set_font(FontFace::Bold, l.fonts.watermark);
                self.surface.set_text_color(l.palette.primary);
                self.surface.text(
                    &l.branding.watermark_text,
                    size.width / 2.0,
                    size.height / 2.0,
                    Alignment::Center,
                );
            }
        }
        self.surface.restore_state();
    }

    /// Logo badge, suite title, subtitle and the divider under them.
    pub fn draw_header(&mut self) {
        let size = self.surface.page_size();
        let l = self.layout;
        let r = l.logo_radius;
        let cx = l.margin + r;
        let cy = l.header_top + r;

        if !self.draw_logo(cx, cy, r) {
            self.draw_badge(cx, cy, r);
        }

        let text_x = cx + r + 12.0;
        self.surface.set_font(FontFace::Bold, l.fonts.suite_title);
        self.surface.set_text_color(l.palette.primary);
        self.surface
            .text(&l.branding.suite_title, text_x, l.header_top + r - 2.0, Alignment::Left);
        self.surface.set_font(FontFace::Regular, l.fonts.suite_subtitle);
        self.surface.set_text_color(l.palette.muted);
        self.surface.text(
            &l.branding.suite_subtitle,
            text_x,
            l.header_top + r + l.fonts.suite_subtitle + 2.0,
            Alignment::Left,
        );

        self.surface.set_draw_color(l.palette.divider);
        self.surface.set_line_width(0.8);
        self.surface.line(
            l.margin,
            l.header_divider_y,
            size.width - l.margin,
            l.header_divider_y,
        );
    }

    /// True when the logo image was drawn inside its circular clip.
    fn draw_logo(&mut self, cx: f32, cy: f32, r: f32) -> bool {
        let Some(asset) = &self.assets.logo else {
            return false;
        };
        self.surface.save_state();
        self.surface.clip_circle(cx, cy, r);
        let drawn = self.surface.image(asset, cx - r, cy - r, 2.0 * r, 2.0 * r);
        self.surface.restore_state();
        match drawn {
            Ok(()) => true,
            Err(e) => {
                log::debug!("logo unusable, drawing badge instead: {e}");
                false
            }
        }
    }

    fn draw_badge(&mut self, cx: f32, cy: f32, r: f32) {
        let l = self.layout;
        self.surface.set_fill_color(l.palette.primary);
        self.surface.fill_circle(cx, cy, r);
        let glyph = l.branding.badge_glyph.chars().next().unwrap_or('L').to_string();
        self.surface.set_font(FontFace::Bold, r);
        self.surface.set_text_color(l.palette.badge_glyph);
        self.surface.text(&glyph, cx, cy + r * 0.35, Alignment::Center);
    }

    /// Divider, centred branding and, when `total_pages > 0`, the page count.
    pub fn draw_footer(&mut self, page: usize, total_pages: usize) {
        let size = self.surface.page_size();
        let l = self.layout;
        let divider_y = size.height - l.footer_offset;
        let baseline = divider_y + 14.0;

        self.surface.set_draw_color(l.palette.divider);
        self.surface.set_line_width(0.5);
        self.surface
            .line(l.margin, divider_y, size.width - l.margin, divider_y);

        self.surface.set_font(FontFace::Regular, l.fonts.footer);
        self.surface.set_text_color(l.palette.muted);
        self.surface
            .text(&l.branding.footer_text, size.width / 2.0, baseline, Alignment::Center);
        if total_pages > 0 {
            self.surface.text(
                &format!("Page {page} of {total_pages}"),
                size.width - l.margin,
                baseline,
                Alignment::Right,
            );
        }
    }

    /// Watermark and header always; the footer only once the page count is known.
    pub fn render_page_base(&mut self, page: usize, total_pages: usize) {
        self.draw_watermark();
        self.draw_header();
        if total_pages > 0 {
            self.draw_footer(page, total_pages);
        }
    }
}
