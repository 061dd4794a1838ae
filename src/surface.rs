use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::fonts;
use crate::model::{Alignment, FontFace, Rgb};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// ISO A4 portrait, in points.
    pub const A4: Size = Size {
        width: 595.28,
        height: 841.89,
    };
}

/// Raw, undecoded raster bytes (PNG or JPEG) plus a stable name used to
/// deduplicate the decoded image across pages.
#[derive(Clone, Debug)]
pub struct ImageAsset {
    pub name: String,
    pub data: Vec<u8>,
}

impl ImageAsset {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(path.to_string_lossy(), data))
    }
}

/// One drawing operation. Coordinates are top-left origin, y downward, points.
/// `Text::x` is the resolved left edge after alignment; `y` is the baseline.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SaveState,
    RestoreState,
    SetOpacity(f32),
    SetFillColor(Rgb),
    SetDrawColor(Rgb),
    SetTextColor(Rgb),
    SetFont {
        face: FontFace,
        size: f32,
    },
    SetLineWidth(f32),
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    FillCircle {
        cx: f32,
        cy: f32,
        r: f32,
    },
    ClipCircle {
        cx: f32,
        cy: f32,
        r: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: usize,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Page {
    pub commands: Vec<Command>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            Command::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Decoded image, stored once per document and referenced by index.
#[derive(Clone, Debug)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

#[derive(Clone, Debug)]
pub struct Document {
    pub page_size: Size,
    pub pages: Vec<Page>,
    pub images: Vec<RasterImage>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 1-based page lookup.
    pub fn page(&self, number: usize) -> Option<&Page> {
        number.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_pdf();
        std::fs::write(path, &bytes).map_err(Error::Io)?;
        log::debug!("Saved {} pages ({} bytes) to {}", self.pages.len(), bytes.len(), path.display());
        Ok(())
    }
}

/// The drawing capability set the composer needs. Pages are 1-based; drawing
/// always targets the active page.
pub trait Surface {
    fn add_page(&mut self) -> Result<()>;
    fn set_page(&mut self, page: usize) -> Result<()>;
    fn current_page(&self) -> usize;
    fn page_count(&self) -> usize;
    fn page_size(&self) -> Size;

    fn set_fill_color(&mut self, color: Rgb);
    fn set_draw_color(&mut self, color: Rgb);
    fn set_text_color(&mut self, color: Rgb);
    fn set_font(&mut self, face: FontFace, size: f32);
    fn set_line_width(&mut self, width: f32);

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32);
    fn clip_circle(&mut self, cx: f32, cy: f32, r: f32);
    fn text(&mut self, text: &str, x: f32, y: f32, align: Alignment);
    fn text_width(&self, text: &str) -> f32;
    /// Draws a raster asset. Undecodable bytes come back as `Error::Image`
    /// and leave the page untouched.
    fn image(&mut self, asset: &ImageAsset, x: f32, y: f32, width: f32, height: f32) -> Result<()>;

    fn save_state(&mut self);
    fn restore_state(&mut self);
    fn set_opacity(&mut self, alpha: f32);
}

/// Last state emitted on the active page. `None` means unknown, so the next
/// setter always records a command.
#[derive(Clone, Debug, Default)]
struct GraphicsState {
    fill_color: Option<Rgb>,
    draw_color: Option<Rgb>,
    text_color: Option<Rgb>,
    font: Option<(FontFace, f32)>,
    line_width: Option<f32>,
}

/// In-memory recording surface. Every page is a command list that stays
/// editable until `finish`, so earlier pages can be revisited.
pub struct Canvas {
    page_size: Size,
    pages: Vec<Page>,
    active: usize,
    current_state: GraphicsState,
    state_stack: Vec<(GraphicsState, (FontFace, f32))>,
    font: (FontFace, f32),
    images: Vec<RasterImage>,
    image_ids: HashMap<String, usize>,
}

impl Canvas {
    /// A canvas starts with one blank page, active.
    pub fn new(page_size: Size) -> Self {
        Self {
            page_size,
            pages: vec![Page::default()],
            active: 0,
            current_state: GraphicsState::default(),
            state_stack: Vec::new(),
            font: (FontFace::Regular, 12.0),
            images: Vec::new(),
            image_ids: HashMap::new(),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn finish(self) -> Document {
        Document {
            page_size: self.page_size,
            pages: self.pages,
            images: self.images,
        }
    }

    fn push(&mut self, command: Command) {
        self.pages[self.active].commands.push(command);
    }

    fn switch_to(&mut self, index: usize) {
        self.active = index;
        self.current_state = GraphicsState::default();
        self.state_stack.clear();
    }

    fn decode(&mut self, asset: &ImageAsset) -> Result<usize> {
        if let Some(&id) = self.image_ids.get(&asset.name) {
            return Ok(id);
        }
        let decoded = image::load_from_memory(&asset.data)
            .map_err(|e| Error::Image(format!("{}: {e}", asset.name)))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
        let rgb: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
        let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());

        let id = self.images.len();
        self.images.push(RasterImage {
            width,
            height,
            rgb,
            alpha,
        });
        self.image_ids.insert(asset.name.clone(), id);
        log::debug!("decoded image {} ({width}x{height}, alpha={has_alpha})", asset.name);
        Ok(id)
    }
}

impl Surface for Canvas {
    fn add_page(&mut self) -> Result<()> {
        self.pages.push(Page::default());
        let last = self.pages.len() - 1;
        self.switch_to(last);
        Ok(())
    }

    fn set_page(&mut self, page: usize) -> Result<()> {
        if page == 0 || page > self.pages.len() {
            return Err(Error::PageOutOfRange {
                requested: page,
                count: self.pages.len(),
            });
        }
        self.switch_to(page - 1);
        Ok(())
    }

    fn current_page(&self) -> usize {
        self.active + 1
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self) -> Size {
        self.page_size
    }

    fn set_fill_color(&mut self, color: Rgb) {
        if self.current_state.fill_color == Some(color) {
            return;
        }
        self.current_state.fill_color = Some(color);
        self.push(Command::SetFillColor(color));
    }

    fn set_draw_color(&mut self, color: Rgb) {
        if self.current_state.draw_color == Some(color) {
            return;
        }
        self.current_state.draw_color = Some(color);
        self.push(Command::SetDrawColor(color));
    }

    fn set_text_color(&mut self, color: Rgb) {
        if self.current_state.text_color == Some(color) {
            return;
        }
        self.current_state.text_color = Some(color);
        self.push(Command::SetTextColor(color));
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        self.font = (face, size);
        if self.current_state.font == Some((face, size)) {
            return;
        }
        self.current_state.font = Some((face, size));
        self.push(Command::SetFont { face, size });
    }

    fn set_line_width(&mut self, width: f32) {
        let width = width.max(0.0);
        if self.current_state.line_width == Some(width) {
            return;
        }
        self.current_state.line_width = Some(width);
        self.push(Command::SetLineWidth(width));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.push(Command::Line { x1, y1, x2, y2 });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.push(Command::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32) {
        self.push(Command::FillCircle { cx, cy, r });
    }

    fn clip_circle(&mut self, cx: f32, cy: f32, r: f32) {
        self.push(Command::ClipCircle { cx, cy, r });
    }

    fn text(&mut self, text: &str, x: f32, y: f32, align: Alignment) {
        let x = match align {
            Alignment::Left => x,
            Alignment::Center => x - self.text_width(text) / 2.0,
            Alignment::Right => x - self.text_width(text),
        };
        self.push(Command::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn text_width(&self, text: &str) -> f32 {
        let (face, size) = self.font;
        fonts::text_width(face, text, size)
    }

    fn image(&mut self, asset: &ImageAsset, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        let image = self.decode(asset)?;
        self.push(Command::Image {
            x,
            y,
            width,
            height,
            image,
        });
        Ok(())
    }

    fn save_state(&mut self) {
        self.state_stack.push((self.current_state.clone(), self.font));
        self.push(Command::SaveState);
    }

    fn restore_state(&mut self) {
        if let Some((state, font)) = self.state_stack.pop() {
            self.current_state = state;
            self.font = font;
            self.push(Command::RestoreState);
        }
    }

    fn set_opacity(&mut self, alpha: f32) {
        self.push(Command::SetOpacity(alpha.clamp(0.0, 1.0)));
    }
}
