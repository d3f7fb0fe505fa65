use anyhow::Result;
use chrono::NaiveDateTime;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use painel_cli::chart::render_bar_chart;
use painel_ingest::RawTable;
use painel_model::{Advisory, Category, IndicatorOptions, IndicatorSnapshot};
use painel_report::{CHART_X_COLUMN, CHART_Y_COLUMN, format_visit, neighborhood_frame};

const CHART_WIDTH: usize = 40;

pub fn print_preview(label: &str, table: &RawTable, total_rows: usize) {
    println!("{label}: first {} of {total_rows} rows", table.len());
    let mut out = Table::new();
    out.set_header(table.headers.iter().map(|name| header_cell(name)));
    apply_table_style(&mut out);
    for row in &table.rows {
        out.add_row(row.iter().map(|value| {
            if value.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(value)
            }
        }));
    }
    println!("{out}");
}

pub fn print_snapshot(
    snapshot: &IndicatorSnapshot,
    options: &IndicatorOptions,
    reference_now: NaiveDateTime,
) -> Result<()> {
    println!("Reference date: {}", format_visit(reference_now));
    let mut table = Table::new();
    table.set_header(vec![header_cell("Indicator"), header_cell("Value")]);
    apply_metric_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for category in Category::ALL {
        table.add_row(vec![
            Cell::new(format!("{category} patients")),
            Cell::new(snapshot.counts.get(category)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total patients").add_attribute(Attribute::Bold),
        Cell::new(snapshot.counts.total).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new(format!(
            "Without a visit for more than {} days",
            snapshot.threshold_days
        )),
        metric_cell(
            snapshot.percent_display(),
            snapshot.has_advisory(Advisory::HighNonAttendanceRate),
        ),
    ]);
    table.add_row(vec![
        Cell::new("Mean days since last visit"),
        metric_cell(
            snapshot.mean_recency_days(),
            snapshot.has_advisory(Advisory::HighMeanRecency),
        ),
    ]);
    println!("{table}");
    print_advisories(snapshot, options);
    print_chart(snapshot)
}

fn print_advisories(snapshot: &IndicatorSnapshot, options: &IndicatorOptions) {
    for advisory in &snapshot.advisories {
        let limit = match advisory {
            Advisory::HighNonAttendanceRate => {
                format!("above {:.0}%", options.non_attendance_warn_percent)
            }
            Advisory::HighMeanRecency => {
                format!("above {:.0} days", options.mean_recency_warn_days)
            }
        };
        eprintln!("warning: {} ({limit})", advisory.message());
    }
}

fn print_chart(snapshot: &IndicatorSnapshot) -> Result<()> {
    println!();
    let counts = match &snapshot.neighborhoods {
        Ok(counts) => counts,
        Err(reason) => {
            eprintln!("warning: {reason}");
            return Ok(());
        }
    };
    let selection: Vec<&str> = snapshot
        .selection
        .iter()
        .copied()
        .map(Category::as_str)
        .collect();
    println!("Patients per neighborhood ({})", selection.join(", "));
    let bars = chart_bars(&neighborhood_frame(counts)?)?;
    print!("{}", render_bar_chart(&bars, CHART_WIDTH));
    Ok(())
}

/// `(neighborhood, count)` pairs from the chart frame, in frame order.
fn chart_bars(frame: &DataFrame) -> Result<Vec<(String, usize)>> {
    let labels = frame.column(CHART_X_COLUMN)?;
    let counts = frame.column(CHART_Y_COLUMN)?;
    (0..frame.height())
        .map(|idx| {
            let label = any_to_string(labels.get(idx)?);
            let count = match counts.get(idx)? {
                AnyValue::UInt64(value) => usize::try_from(value)?,
                _ => 0,
            };
            Ok((label, count))
        })
        .collect()
}

fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(value) => value.to_string(),
        AnyValue::StringOwned(value) => value.to_string(),
        other => other.to_string(),
    }
}

pub fn print_records(frame: &DataFrame) {
    println!();
    println!("Patients ({} records)", frame.height());
    let mut table = Table::new();
    table.set_header(
        frame
            .get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str())),
    );
    apply_table_style(&mut table);
    let columns = frame.get_columns();
    for idx in 0..frame.height() {
        table.add_row(columns.iter().map(|column| {
            match column.get(idx).unwrap_or(AnyValue::Null) {
                AnyValue::Null => dim_cell("-"),
                AnyValue::String(value) if value.is_empty() => dim_cell("-"),
                AnyValue::String(value) => Cell::new(value),
                AnyValue::StringOwned(value) => Cell::new(value.as_str()),
                other => Cell::new(other.to_string()).set_alignment(CellAlignment::Right),
            }
        }));
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_metric_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn metric_cell<T: ToString>(value: T, flagged: bool) -> Cell {
    if flagged {
        Cell::new(value)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(value)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
