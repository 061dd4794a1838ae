mod blocks;
mod finalize;
mod furniture;
pub mod layout;
mod table;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::surface::{ImageAsset, Surface};

use layout::Layout;

pub use table::amortization_columns;

const LOGO_ENV: &str = "LENDING_REPORT_LOGO";
const WATERMARK_ENV: &str = "LENDING_REPORT_WATERMARK";

/// Vertical cursor plus the active page's dimensions. A plain value: every
/// drawing operation takes one and hands back the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderContext {
    pub cursor_y: f32,
    pub page_width: f32,
    pub page_height: f32,
}

impl RenderContext {
    /// Context at the top of the content area of the surface's active page.
    pub fn new(surface: &impl Surface, layout: &Layout) -> Self {
        let size = surface.page_size();
        Self {
            cursor_y: layout.page_top_start,
            page_width: size.width,
            page_height: size.height,
        }
    }

    pub fn advance(self, height: f32) -> Self {
        Self {
            cursor_y: self.cursor_y + height,
            ..self
        }
    }
}

/// Optional branding images. Either may be absent or undecodable; furniture
/// degrades instead of failing.
#[derive(Clone, Debug, Default)]
pub struct Assets {
    pub logo: Option<ImageAsset>,
    pub watermark: Option<ImageAsset>,
}

impl Assets {
    /// Explicit paths win; otherwise `LENDING_REPORT_LOGO` and
    /// `LENDING_REPORT_WATERMARK` are consulted.
    pub fn load(logo: Option<&Path>, watermark: Option<&Path>) -> Result<Self> {
        let resolve = |explicit: Option<&Path>, var: &str| -> Option<PathBuf> {
            explicit.map(Path::to_path_buf).or_else(|| {
                std::env::var(var)
                    .ok()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
        };
        let logo = resolve(logo, LOGO_ENV)
            .map(|p| ImageAsset::load(&p))
            .transpose()?;
        let watermark = resolve(watermark, WATERMARK_ENV)
            .map(|p| ImageAsset::load(&p))
            .transpose()?;
        Ok(Self { logo, watermark })
    }
}

/// Drives one surface through a report. Holds the surface borrow so only one
/// rendering sequence can advance it at a time.
pub struct Composer<'a, S: Surface> {
    surface: &'a mut S,
    layout: &'a Layout,
    assets: &'a Assets,
}

impl<'a, S: Surface> Composer<'a, S> {
    pub fn new(surface: &'a mut S, layout: &'a Layout, assets: &'a Assets) -> Self {
        Self {
            surface,
            layout,
            assets,
        }
    }

    pub fn layout(&self) -> &Layout {
        self.layout
    }

    pub fn surface(&self) -> &S {
        &*self.surface
    }

    /// Fresh context for the active page.
    pub fn start(&self) -> RenderContext {
        RenderContext::new(&*self.surface, self.layout)
    }

    /// The single page-break decision point. Returns `ctx` untouched when
    /// `required` still fits above `content_limit`; otherwise opens a page,
    /// draws watermark and header on it and returns a context at the top.
    ///
    /// A block taller than the whole content area that is asked for at the top
    /// of a page gets no new page: `ctx` comes back unchanged and the block
    /// overflows the current page instead of opening blank pages forever.
    pub fn ensure_space(&mut self, ctx: RenderContext, required: f32) -> Result<RenderContext> {
        if ctx.cursor_y + required <= self.layout.content_limit {
            return Ok(ctx);
        }
        // Already at the top of an empty content area: a new page would not help.
        if ctx.cursor_y <= self.layout.page_top_start {
            log::debug!(
                "block of {required:.1}pt exceeds the content area; drawing it on page {} anyway",
                self.surface.current_page()
            );
            return Ok(ctx);
        }

        self.surface.add_page()?;
        let page = self.surface.current_page();
        log::debug!(
            "page break: cursor={:.1} required={:.1} limit={:.1} -> page {page}",
            ctx.cursor_y,
            required,
            self.layout.content_limit
        );
        self.render_page_base(page, 0);
        Ok(RenderContext::new(&*self.surface, self.layout))
    }
}
