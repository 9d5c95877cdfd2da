//! End-to-end data pipeline: clipboard text → wide table → long records →
//! grouped chart.

use clipplot::config::{AxisScale, PlotConfig};
use clipplot::ingest::parse_table;
use clipplot::models::{retain_numeric, summarize, ErrorBarKind, Statistic};
use clipplot::ui::plot_view::build_chart;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn excel_paste_to_chart() {
    let text = "A\tB\n1\t4\n2\t5\n3\t6\n";
    let table = parse_table(text).unwrap();
    let records = table.melt();

    // n columns x m rows records before filtering, labeled by header.
    assert_eq!(records.len(), 6);
    assert!(records[..3].iter().all(|r| r.group == "A"));
    assert!(records[3..].iter().all(|r| r.group == "B"));

    let chart = build_chart(&records, &PlotConfig::default());
    assert_eq!(chart.groups.len(), 2);
    assert!(approx(chart.groups[0].height, 2.0));
    assert!(approx(chart.groups[1].height, 5.0));
}

#[test]
fn filtering_is_idempotent_on_parsed_input() {
    let table = parse_table("A\tB\n1\toops\n\t5\n3\t6\n").unwrap();
    let once = retain_numeric(table.melt());
    let twice = retain_numeric(once.clone());
    assert_eq!(once, twice);
    assert_eq!(once.len(), 4);
}

#[test]
fn mean_and_sem_match_hand_computation() {
    let table = parse_table("A\n2\n4\n6\n").unwrap();
    let summaries = summarize(&table.melt(), Statistic::Mean, ErrorBarKind::StandardError);

    assert_eq!(summaries.len(), 1);
    assert!(approx(summaries[0].statistic, 4.0));
    // sd = 2, sem = 2 / sqrt(3)
    assert!(approx(summaries[0].error.unwrap(), 2.0 / 3f64.sqrt()));
}

#[test]
fn median_with_sd_over_messy_input() {
    let table = parse_table("X\n5\nbad\n1\n3\n").unwrap();
    let summaries = summarize(
        &table.melt(),
        Statistic::Median,
        ErrorBarKind::StandardDeviation,
    );

    // "bad" is dropped, leaving 1, 3, 5.
    assert_eq!(summaries[0].values.len(), 3);
    assert!(approx(summaries[0].statistic, 3.0));
    assert!(approx(summaries[0].error.unwrap(), 2.0));
}

#[test]
fn log_scale_chart_from_clipboard_text() {
    let mut config = PlotConfig::default();
    config.y_scale = AxisScale::Logarithmic;
    config.log_base = "10".to_string();

    let table = parse_table("A\n10\n1000\n").unwrap();
    let chart = build_chart(&table.melt(), &config);

    assert_eq!(chart.log_base, Some(10.0));
    // mean(10, 1000) = 505, plotted at log10(505)
    assert!(approx(chart.groups[0].height, 505f64.log10()));
    assert!(approx(chart.groups[0].points[0], 1.0));
    assert!(approx(chart.groups[0].points[1], 3.0));
}

#[test]
fn malformed_log_base_falls_back_instead_of_failing() {
    let mut config = PlotConfig::default();
    config.y_scale = AxisScale::Logarithmic;
    config.log_base = "banana".to_string();

    let table = parse_table("A\n10\n100\n").unwrap();
    let chart = build_chart(&table.melt(), &config);

    assert_eq!(chart.log_base, Some(10.0));
    assert!(approx(chart.groups[0].points[0], 1.0));
}

#[test]
fn group_of_all_invalid_cells_is_omitted() {
    let table = parse_table("A\tB\n1\tx\n2\ty\n").unwrap();
    let chart = build_chart(&table.melt(), &PlotConfig::default());

    assert_eq!(chart.groups.len(), 1);
    assert_eq!(chart.groups[0].label, "A");
}
