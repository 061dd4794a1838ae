mod common;

use lending_report_pdf::model::{GenericReport, ReportItem};
use lending_report_pdf::{Assets, Command, Document, Layout, render_generic_report};

fn report() -> GenericReport {
    GenericReport {
        title: "Branding check".into(),
        subtitle: None,
        items: vec![ReportItem {
            label: "Borrower".into(),
            value: "A. Sharma".into(),
            kind: Default::default(),
        }],
        tables: Vec::new(),
    }
}

fn render(assets: &Assets) -> Document {
    common::init_logging();
    render_generic_report(&Layout::default(), assets, &report()).expect("render")
}

fn images(doc: &Document, page: usize) -> usize {
    common::count_commands(doc.page(page).unwrap(), |c| matches!(c, Command::Image { .. }))
}

#[test]
fn missing_logo_draws_badge_and_text_watermark() {
    let layout = Layout::default();
    let doc = render(&Assets::default());
    let page = doc.page(1).unwrap();

    assert_eq!(images(&doc, 1), 0);
    assert_eq!(common::count_commands(page, |c| matches!(c, Command::FillCircle { .. })), 1);
    assert_eq!(common::count_text(page, &layout.branding.badge_glyph), 1);
    assert_eq!(common::count_text(page, &layout.branding.watermark_text), 1);
    assert_eq!(common::count_text(page, &layout.branding.suite_title), 1);
    assert_eq!(common::count_text(page, &layout.branding.suite_subtitle), 1);
}

#[test]
fn logo_is_clipped_to_circle() {
    let assets = Assets {
        logo: Some(common::png_asset("logo")),
        watermark: None,
    };
    let doc = render(&assets);
    let page = doc.page(1).unwrap();

    assert_eq!(images(&doc, 1), 1);
    assert_eq!(common::count_commands(page, |c| matches!(c, Command::ClipCircle { .. })), 1);
    assert_eq!(common::count_commands(page, |c| matches!(c, Command::FillCircle { .. })), 0);
    assert_eq!(doc.images.len(), 1);
}

#[test]
fn corrupt_logo_falls_back_to_badge() {
    let layout = Layout::default();
    let assets = Assets {
        logo: Some(common::corrupt_asset("broken-logo")),
        watermark: None,
    };
    let doc = render(&assets);
    let page = doc.page(1).unwrap();

    assert_eq!(images(&doc, 1), 0);
    assert_eq!(common::count_commands(page, |c| matches!(c, Command::FillCircle { .. })), 1);
    assert_eq!(common::count_text(page, &layout.branding.badge_glyph), 1);
}

#[test]
fn image_watermark_replaces_text_mark() {
    let layout = Layout::default();
    let assets = Assets {
        logo: None,
        watermark: Some(common::png_asset("watermark")),
    };
    let doc = render(&assets);
    let page = doc.page(1).unwrap();

    assert_eq!(images(&doc, 1), 1);
    assert_eq!(common::count_text(page, &layout.branding.watermark_text), 0);
    assert!(page.commands.iter().any(|c| matches!(c, Command::SetOpacity(a) if *a < 1.0)));
}

#[test]
fn corrupt_watermark_is_skipped() {
    let layout = Layout::default();
    let assets = Assets {
        logo: None,
        watermark: Some(common::corrupt_asset("broken-watermark")),
    };
    let doc = render(&assets);
    let page = doc.page(1).unwrap();

    assert_eq!(images(&doc, 1), 0);
    assert_eq!(common::count_text(page, &layout.branding.watermark_text), 0);
    assert_eq!(common::count_text(page, "Page 1 of 1"), 1);
}

#[test]
fn save_and_restore_are_balanced() {
    let assets = Assets {
        logo: Some(common::png_asset("logo")),
        watermark: Some(common::png_asset("watermark")),
    };
    let doc = render(&assets);
    for page in &doc.pages {
        let saves = common::count_commands(page, |c| matches!(c, Command::SaveState));
        let restores = common::count_commands(page, |c| matches!(c, Command::RestoreState));
        assert_eq!(saves, restores);
    }
    assert_eq!(doc.images.len(), 2);
}
