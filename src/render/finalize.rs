use crate::error::Result;
use crate::surface::Surface;

use super::Composer;

impl<S: Surface> Composer<'_, S> {
    /// Second pass once the document is complete: revisit every page and draw
    /// its full footer with the final page count. Footers have no partial
    /// variant, so divider and branding are drawn again along with the count.
    /// Leaves the last page active. Returns the page count.
    pub fn finalize_footers(&mut self) -> Result<usize> {
        let total = self.surface.page_count();
        for page in 1..=total {
            self.surface.set_page(page)?;
            self.draw_footer(page, total);
        }
        log::debug!("footers patched on {total} pages");
        Ok(total)
    }
}
