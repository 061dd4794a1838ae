//! Fixed page geometry, type sizes, palette and branding. Loaded once (either
//! the defaults or a JSON override file) and never mutated afterwards.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::model::Rgb;
use crate::surface::Size;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub suite_title: f32,
    pub suite_subtitle: f32,
    pub title: f32,
    pub subtitle: f32,
    pub section: f32,
    pub body: f32,
    pub table_header: f32,
    pub table_body: f32,
    pub footer: f32,
    pub watermark: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            suite_title: 15.0,
            suite_subtitle: 9.0,
            title: 16.0,
            subtitle: 10.0,
            section: 12.0,
            body: 10.0,
            table_header: 9.0,
            table_body: 8.5,
            footer: 8.0,
            watermark: 64.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub divider: Rgb,
    pub table_header_fill: Rgb,
    pub table_header_text: Rgb,
    pub stripe: Rgb,
    pub badge_glyph: Rgb,
    pub positive: Rgb,
    pub negative: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: [22, 78, 99],
            text: [33, 37, 41],
            muted: [108, 117, 125],
            divider: [200, 206, 212],
            table_header_fill: [22, 78, 99],
            table_header_text: [255, 255, 255],
            stripe: [236, 243, 246],
            badge_glyph: [255, 255, 255],
            positive: [25, 135, 84],
            negative: [200, 35, 51],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub suite_title: String,
    pub suite_subtitle: String,
    pub footer_text: String,
    /// Drawn inside the fallback badge when the logo is missing or unreadable.
    pub badge_glyph: String,
    pub watermark_text: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            suite_title: "Lending Reports".to_string(),
            suite_subtitle: "Loan servicing and group assessment".to_string(),
            footer_text: "Generated by lending-report-pdf".to_string(),
            badge_glyph: "L".to_string(),
            watermark_text: "CONFIDENTIAL".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Cursor value at the top of the content area of every page.
    pub page_top_start: f32,
    /// Largest cursor value content may reach before a page break is forced.
    pub content_limit: f32,
    pub header_top: f32,
    pub header_divider_y: f32,
    pub logo_radius: f32,
    /// Distance of the footer divider from the bottom edge.
    pub footer_offset: f32,
    pub header_row_height: f32,
    pub row_height: f32,
    pub cell_padding: f32,
    pub field_line_height: f32,
    pub label_column_width: f32,
    pub section_height: f32,
    pub title_height: f32,
    pub block_gap: f32,
    pub watermark_opacity: f32,
    pub fonts: FontSizes,
    pub palette: Palette,
    pub branding: Branding,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            page_width: Size::A4.width,
            page_height: Size::A4.height,
            margin: 40.0,
            page_top_start: 100.0,
            content_limit: 785.0,
            header_top: 22.0,
            header_divider_y: 78.0,
            logo_radius: 22.0,
            footer_offset: 42.0,
            header_row_height: 20.0,
            row_height: 17.0,
            cell_padding: 4.0,
            field_line_height: 17.0,
            label_column_width: 190.0,
            section_height: 30.0,
            title_height: 44.0,
            block_gap: 12.0,
            watermark_opacity: 0.06,
            fonts: FontSizes::default(),
            palette: Palette::default(),
            branding: Branding::default(),
        }
    }
}

impl Layout {
    /// Missing keys keep their default value.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let layout: Layout = serde_json::from_slice(&bytes)?;
        log::debug!("Loaded layout overrides from {}", path.display());
        Ok(layout)
    }

    pub fn page_size(&self) -> Size {
        Size {
            width: self.page_width,
            height: self.page_height,
        }
    }
}
