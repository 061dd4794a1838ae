use pdf_writer::{Name, Pdf, Ref};

use crate::model::FontFace;

/// Advance widths (1000-unit em) for WinAnsi bytes 32..=126, from the standard
/// Helvetica AFM.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
    278, 278, 584, 584, 584, 556, 1015, // 58-64
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // 91-96
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // 123-126
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
    333, 333, 584, 584, 584, 611, 975, // 58-64
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // 91-96
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // 123-126
];

pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
}

pub(crate) fn base_font_name(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "Helvetica",
        FontFace::Bold => "Helvetica-Bold",
    }
}

pub(crate) fn resource_name(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "F1",
        FontFace::Bold => "F2",
    }
}

fn char_width_1000(face: FontFace, ch: char) -> f32 {
    let table = match face {
        FontFace::Regular => &HELVETICA_WIDTHS,
        FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match char_to_winansi(ch) {
        0 => 0.0,
        b @ 32..=126 => table[(b - 32) as usize] as f32,
        0xA0 => 278.0, // nbsp
        _ => 556.0,
    }
}

/// Rendered width of `text` in points.
pub fn text_width(face: FontFace, text: &str, font_size: f32) -> f32 {
    text.chars()
        .map(|ch| char_width_1000(face, ch) * font_size / 1000.0)
        .sum()
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters outside the code page are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

/// Register one of the two standard Type1 faces. Nothing is embedded; every
/// conforming reader ships Helvetica.
pub(crate) fn register_font(pdf: &mut Pdf, face: FontFace, alloc: &mut impl FnMut() -> Ref) -> FontEntry {
    let font_ref = alloc();
    pdf.type1_font(font_ref)
        .base_font(Name(base_font_name(face).as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    log::debug!("register_font: {} as {}", base_font_name(face), resource_name(face));
    FontEntry {
        pdf_name: resource_name(face).to_string(),
        font_ref,
    }
}
