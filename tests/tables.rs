mod common;

use lending_report_pdf::model::AmortizationRow;
use lending_report_pdf::render::amortization_columns;
use lending_report_pdf::{Assets, Canvas, Command, Composer, Layout};

fn row(month: u32, due_date: Option<&str>) -> AmortizationRow {
    AmortizationRow {
        month,
        due_date: due_date.map(str::to_string),
        emi: 1234.5,
        principal: 1000.0,
        interest: 234.5,
        balance: 12345678.9,
    }
}

#[test]
fn stripes_follow_logical_row_index_across_pages() {
    let layout = Layout::default();
    let canvas = common::render_table_canvas(&layout, &Assets::default(), 101);

    let mut striped = 0;
    for page in canvas.pages() {
        let stripes = common::filled_rects(page, layout.palette.stripe);
        for (i, baseline) in common::row_baselines(page) {
            let has_stripe = stripes
                .iter()
                .any(|&(y, h)| y <= baseline && baseline < y + h);
            assert_eq!(has_stripe, i % 2 == 0, "row {i}");
            striped += usize::from(has_stripe);
        }
    }
    assert_eq!(striped, 51);
}

#[test]
fn empty_column_list_draws_nothing() {
    let layout = Layout::default();
    let assets = Assets::default();
    let mut canvas = Canvas::new(layout.page_size());
    {
        let mut composer = Composer::new(&mut canvas, &layout, &assets);
        let ctx = composer.start();
        let after = composer.render_table(ctx, &[], &common::table_rows(5)).unwrap();
        assert_eq!(after, ctx);
    }
    assert!(canvas.pages()[0].commands.is_empty());
}

#[test]
fn due_date_column_decided_by_first_row() {
    let dated = vec![row(1, Some("2024-02-01")), row(2, None)];
    assert_eq!(
        amortization_columns(&dated),
        ["Month", "Due Date", "EMI", "Principal", "Interest", "Balance"]
    );

    let undated = vec![row(1, None), row(2, Some("2024-03-01"))];
    assert_eq!(
        amortization_columns(&undated),
        ["Month", "EMI", "Principal", "Interest", "Balance"]
    );

    let blank = vec![row(1, Some("   "))];
    assert_eq!(amortization_columns(&blank).len(), 5);
    assert_eq!(amortization_columns(&[]).len(), 5);
}

#[test]
fn amortization_cells_are_formatted() {
    let layout = Layout::default();
    let assets = Assets::default();
    let rows = vec![row(1, Some("2024-03-05")), row(2, Some("")), row(3, Some("soon"))];
    let mut canvas = Canvas::new(layout.page_size());
    {
        let mut composer = Composer::new(&mut canvas, &layout, &assets);
        let ctx = composer.start();
        composer.render_amortization_table(ctx, &rows).unwrap();
    }

    let page = &canvas.pages()[0];
    assert_eq!(common::count_text(page, "Due Date"), 1);
    assert_eq!(common::count_text(page, "05-03-2024"), 1);
    assert_eq!(common::count_text(page, "--"), 1);
    assert_eq!(common::count_text(page, "soon"), 1);
    assert_eq!(common::count_text(page, "Rs. 1,234.50"), 3);
    assert_eq!(common::count_text(page, "Rs. 1,23,45,678.90"), 3);
}

#[test]
fn long_schedule_repeats_amortization_header() {
    let layout = Layout::default();
    let assets = Assets::default();
    let rows: Vec<AmortizationRow> = (1..=120).map(|m| row(m, None)).collect();
    let mut canvas = Canvas::new(layout.page_size());
    {
        let mut composer = Composer::new(&mut canvas, &layout, &assets);
        composer.render_page_base(1, 0);
        let ctx = composer.start();
        composer.render_amortization_table(ctx, &rows).unwrap();
        composer.finalize_footers().unwrap();
    }

    assert!(canvas.pages().len() > 1);
    for page in canvas.pages() {
        assert_eq!(common::count_text(page, "Interest"), 1);
        assert_eq!(common::count_text(page, "Due Date"), 0);
    }
}

#[test]
fn undated_first_row_keeps_five_columns_for_whole_schedule() {
    let layout = Layout::default();
    let assets = Assets::default();
    let rows = vec![
        row(1, None),
        row(2, Some("2024-03-05")),
        row(3, Some("2024-04-05")),
    ];
    let mut canvas = Canvas::new(layout.page_size());
    {
        let mut composer = Composer::new(&mut canvas, &layout, &assets);
        let ctx = composer.start();
        composer.render_amortization_table(ctx, &rows).unwrap();
    }

    let page = &canvas.pages()[0];
    assert_eq!(common::count_text(page, "Due Date"), 0);
    for date in ["05-03-2024", "05-04-2024", "2024-03-05", "2024-04-05"] {
        assert_eq!(common::count_text(page, date), 0, "{date} drawn");
    }
    for month in ["1", "2", "3"] {
        let baselines = common::text_baselines(page, month);
        assert_eq!(baselines.len(), 1);
        let cells = page
            .commands
            .iter()
            .filter(|c| matches!(c, Command::Text { y, .. } if *y == baselines[0]))
            .count();
        assert_eq!(cells, 5, "month {month}");
    }
}
