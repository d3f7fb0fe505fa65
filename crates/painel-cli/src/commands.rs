use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use tracing::{info, info_span};

use painel_cli::logging::log_unknown_neighborhoods;
use painel_core::SessionContext;
use painel_ingest::{RawTable, read_roster};
use painel_model::{Category, IndicatorOptions};
use painel_report::{SnapshotReport, filtered_frame, write_unified_csv};
use painel_transform::local_now;

use crate::cli::{OutputFormatArg, PreviewArgs, ReportArgs, RosterArgs};
use crate::summary::{print_preview, print_records, print_snapshot};

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let (hypertensive, diabetic) = load_rosters(&args.rosters)?;
    let totals = [hypertensive.len(), diabetic.len()];
    let mut session = SessionContext::new();
    session.stage(hypertensive, diabetic);
    print_previews(&session, args.rows, totals);
    Ok(())
}

pub fn run_report(args: &ReportArgs) -> Result<()> {
    let span = info_span!("report", threshold_days = args.threshold_days);
    let _guard = span.enter();

    let (hypertensive, diabetic) = load_rosters(&args.rosters)?;
    let totals = [hypertensive.len(), diabetic.len()];
    let options = IndicatorOptions::default().with_threshold_days(args.threshold_days);
    let mut session = SessionContext::new().with_options(options);
    session.stage(hypertensive, diabetic);

    // Previews go to stdout, which must stay clean for JSON output.
    if matches!(args.format, OutputFormatArg::Table) && args.preview_rows > 0 {
        print_previews(&session, args.preview_rows, totals);
    }
    confirm_upload(args.yes)?;

    let reference_now = args
        .as_of
        .map(|date| date.and_time(NaiveTime::MIN))
        .unwrap_or_else(local_now);
    session
        .confirm(reference_now)
        .context("build unified table")?;
    let table = session
        .table()
        .context("unified table missing after confirmation")?;
    log_unknown_neighborhoods(table);

    if let Some(path) = &args.export {
        write_unified_csv(table, path)
            .with_context(|| format!("export unified table to {}", path.display()))?;
    }

    let selected = args.selected_categories();
    let snapshot = session.snapshot(&selected).context("compute indicators")?;
    info!(
        total = snapshot.counts.total,
        advisories = snapshot.advisories.len(),
        "indicators computed"
    );

    match args.format {
        OutputFormatArg::Json => {
            let report = SnapshotReport::new(&snapshot, table.reference_now());
            println!("{}", report.to_json_pretty().context("serialize indicators")?);
        }
        OutputFormatArg::Table => {
            print_snapshot(&snapshot, &session.options, table.reference_now())?;
            if args.show_records && snapshot.neighborhoods.is_ok() {
                let frame = filtered_frame(table, &selected).context("build patient listing")?;
                print_records(&frame);
            }
        }
    }
    Ok(())
}

fn load_rosters(args: &RosterArgs) -> Result<(RawTable, RawTable)> {
    let hypertensive = read_roster(&args.hypertensive).with_context(|| {
        format!(
            "read hypertensive roster {}",
            args.hypertensive.display()
        )
    })?;
    let diabetic = read_roster(&args.diabetic)
        .with_context(|| format!("read diabetic roster {}", args.diabetic.display()))?;
    Ok((hypertensive, diabetic))
}

fn print_previews(session: &SessionContext, rows: usize, totals: [usize; 2]) {
    let Some((hypertensive, diabetic)) = session.preview(rows) else {
        return;
    };
    for ((category, table), total) in Category::ALL
        .into_iter()
        .zip([hypertensive, diabetic])
        .zip(totals)
    {
        print_preview(&format!("{category} roster"), &table, total);
    }
}

fn confirm_upload(assume_yes: bool) -> Result<()> {
    if assume_yes {
        return Ok(());
    }
    if !io::stdin().is_terminal() {
        bail!("upload not confirmed; pass --yes to build the unified table");
    }
    eprint!("Build the unified table from these rosters? [y/N] ");
    io::stderr().flush().context("flush confirmation prompt")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read confirmation")?;
    if !is_affirmative(&answer) {
        bail!("upload not confirmed");
    }
    Ok(())
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_english_and_portuguese_answers() {
        for answer in ["y\n", "YES", " s ", "Sim\r\n"] {
            assert!(is_affirmative(answer), "{answer:?}");
        }
        for answer in ["", "n", "no", "nao", "yep"] {
            assert!(!is_affirmative(answer), "{answer:?}");
        }
    }
}
