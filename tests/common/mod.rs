#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use lending_report_pdf::model::{CellValue, Rgb};
use lending_report_pdf::{Assets, Canvas, Command, Composer, ImageAsset, Layout, Page, Surface};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Scratch file under the system temp dir, unique per test process.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lending-report-pdf-{}-{name}", std::process::id()))
}

pub fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}

pub fn png_asset(name: &str) -> ImageAsset {
    ImageAsset::new(name, png_bytes(8, 8, [20, 90, 140, 200]))
}

pub fn corrupt_asset(name: &str) -> ImageAsset {
    ImageAsset::new(name, b"definitely not an image".to_vec())
}

pub const TABLE_COLUMNS: [&str; 3] = ["Reference", "Amount", "Note"];

pub fn table_columns() -> Vec<String> {
    TABLE_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// `row-<i>` in the first cell so rows can be found again on the canvas.
pub fn table_rows(count: usize) -> Vec<Vec<CellValue>> {
    (0..count)
        .map(|i| {
            vec![
                CellValue::Text(format!("row-{i}")),
                CellValue::Integer(i as i64 * 100),
                CellValue::Text("ok".into()),
            ]
        })
        .collect()
}

/// Page base, one generic table of `rows` rows, then the footer patch pass.
pub fn render_table_canvas(layout: &Layout, assets: &Assets, rows: usize) -> Canvas {
    let mut canvas = Canvas::new(layout.page_size());
    {
        let mut composer = Composer::new(&mut canvas, layout, assets);
        let page = composer.surface().current_page();
        composer.render_page_base(page, 0);
        let ctx = composer.start();
        composer
            .render_table(ctx, &table_columns(), &table_rows(rows))
            .expect("render table");
        composer.finalize_footers().expect("patch footers");
    }
    canvas
}

pub fn count_text(page: &Page, needle: &str) -> usize {
    page.texts().filter(|t| *t == needle).count()
}

/// `(index, baseline)` of every `row-<i>` cell on the page.
pub fn row_baselines(page: &Page) -> Vec<(usize, f32)> {
    page.commands
        .iter()
        .filter_map(|c| match c {
            Command::Text { y, text, .. } => text
                .strip_prefix("row-")
                .and_then(|i| i.parse().ok())
                .map(|i| (i, *y)),
            _ => None,
        })
        .collect()
}

pub fn text_baselines(page: &Page, needle: &str) -> Vec<f32> {
    page.commands
        .iter()
        .filter_map(|c| match c {
            Command::Text { y, text, .. } if text == needle => Some(*y),
            _ => None,
        })
        .collect()
}

/// `(y, height)` of rectangles filled while `color` was the active fill.
pub fn filled_rects(page: &Page, color: Rgb) -> Vec<(f32, f32)> {
    let mut fill = None;
    let mut rects = Vec::new();
    for command in &page.commands {
        match command {
            Command::SetFillColor(c) => fill = Some(*c),
            Command::FillRect { y, height, .. } if fill == Some(color) => rects.push((*y, *height)),
            _ => {}
        }
    }
    rects
}

pub fn count_commands(page: &Page, pred: impl Fn(&Command) -> bool) -> usize {
    page.commands.iter().filter(|c| pred(c)).count()
}
