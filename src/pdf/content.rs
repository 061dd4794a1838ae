use std::collections::HashMap;

use pdf_writer::{Content, Name, Str};

use crate::fonts::{resource_name, to_winansi_bytes};
use crate::model::{FontFace, Rgb};
use crate::surface::{Command, Page};

/// Bezier control offset for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

#[derive(Clone, Copy)]
struct PenState {
    fill: Rgb,
    text: Rgb,
    font: (FontFace, f32),
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            fill: [0, 0, 0],
            text: [0, 0, 0],
            font: (FontFace::Regular, 12.0),
        }
    }
}

fn set_fill(content: &mut Content, [r, g, b]: Rgb) {
    content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
}

fn circle_path(content: &mut Content, cx: f32, cy: f32, r: f32) {
    let k = KAPPA * r;
    content.move_to(cx + r, cy);
    content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    content.close_path();
}

/// Opacity values are keyed in thousandths so equal alphas share one ExtGState.
pub(super) fn alpha_key(alpha: f32) -> u32 {
    (alpha.clamp(0.0, 1.0) * 1000.0).round() as u32
}

/// Translate one recorded page into a PDF content stream. The recorder uses a
/// top-left origin; PDF user space is bottom-left, so every y is flipped.
pub(super) fn build_page_content(
    page: &Page,
    page_height: f32,
    image_names: &[String],
    gs_names: &HashMap<u32, String>,
) -> Content {
    let mut content = Content::new();
    let mut pen = PenState::default();
    let mut stack: Vec<PenState> = Vec::new();
    let flip = |y: f32| page_height - y;

    for command in &page.commands {
        match command {
            Command::SaveState => {
                stack.push(pen);
                content.save_state();
            }
            Command::RestoreState => {
                if let Some(saved) = stack.pop() {
                    pen = saved;
                    content.restore_state();
                }
            }
            Command::SetOpacity(alpha) => {
                if let Some(name) = gs_names.get(&alpha_key(*alpha)) {
                    content.set_parameters(Name(name.as_bytes()));
                }
            }
            Command::SetFillColor(color) => pen.fill = *color,
            Command::SetTextColor(color) => pen.text = *color,
            Command::SetDrawColor([r, g, b]) => {
                content.set_stroke_rgb(*r as f32 / 255.0, *g as f32 / 255.0, *b as f32 / 255.0);
            }
            Command::SetFont { face, size } => pen.font = (*face, *size),
            Command::SetLineWidth(width) => {
                content.set_line_width(*width);
            }
            Command::Line { x1, y1, x2, y2 } => {
                content.move_to(*x1, flip(*y1));
                content.line_to(*x2, flip(*y2));
                content.stroke();
            }
            Command::FillRect {
                x,
                y,
                width,
                height,
            } => {
                set_fill(&mut content, pen.fill);
                content.rect(*x, flip(*y) - height, *width, *height);
                content.fill_nonzero();
            }
            Command::FillCircle { cx, cy, r } => {
                set_fill(&mut content, pen.fill);
                circle_path(&mut content, *cx, flip(*cy), *r);
                content.fill_nonzero();
            }
            Command::ClipCircle { cx, cy, r } => {
                circle_path(&mut content, *cx, flip(*cy), *r);
                content.clip_nonzero();
                content.end_path();
            }
            Command::Text { x, y, text } => {
                let bytes = to_winansi_bytes(text);
                if bytes.is_empty() {
                    continue;
                }
                let (face, size) = pen.font;
                set_fill(&mut content, pen.text);
                content
                    .begin_text()
                    .set_font(Name(resource_name(face).as_bytes()), size)
                    .next_line(*x, flip(*y))
                    .show(Str(&bytes))
                    .end_text();
            }
            Command::Image {
                x,
                y,
                width,
                height,
                image,
            } => {
                let Some(name) = image_names.get(*image) else {
                    log::warn!("image #{image} was never embedded; skipping");
                    continue;
                };
                content.save_state();
                content.transform([*width, 0.0, 0.0, *height, *x, flip(*y) - height]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
        }
    }

    // Balance any state left open so the next page starts clean.
    for _ in stack {
        content.restore_state();
    }
    content
}
