//! End-to-end runs of the `painel` binary against small rosters.

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const HYPERTENSIVE: &str = "\
CNS,Endereco,Ultimo atendimento,Idade
111,\"Rua A 10. Centro, Porto Alegre - RS\",01/01/2024,61
112,\"Av B 200 - Partenon, Porto Alegre - RS\",01/12/2024,58
113,Sem endereco,sem data,70
";

const DIABETIC: &str = "\
CNS,Endereco,Ultimo atendimento,Idade
221,\"Rua C 5. Centro, Porto Alegre - RS\",01/06/2024,49
222,,15/12/2024,66
";

fn write_rosters(dir: &Path) -> (String, String) {
    let hypertensive = dir.join("hipertensos.csv");
    let diabetic = dir.join("diabeticos.csv");
    fs::write(&hypertensive, HYPERTENSIVE).expect("write hypertensive roster");
    fs::write(&diabetic, DIABETIC).expect("write diabetic roster");
    (
        hypertensive.display().to_string(),
        diabetic.display().to_string(),
    )
}

fn painel(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_painel"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("run painel")
}

#[test]
fn report_json_summarizes_both_rosters() {
    let dir = TempDir::new().expect("temp dir");
    let (hypertensive, diabetic) = write_rosters(dir.path());
    let output = painel(&[
        "report",
        &hypertensive,
        &diabetic,
        "--as-of",
        "2025-01-01",
        "--format",
        "json",
        "--yes",
    ]);
    assert!(output.status.success(), "{output:?}");

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["counts"]["hypertensive"], 3);
    assert_eq!(report["counts"]["diabetic"], 2);
    assert_eq!(report["counts"]["total"], 5);
    assert_eq!(report["percent_beyond_threshold"], "40.0%");
    assert_eq!(report["neighborhoods"][0]["neighborhood"], "Centro");
    assert_eq!(report["neighborhoods"][0]["count"], 2);
    assert!(report["empty_selection"].is_null());
}

#[test]
fn report_without_confirmation_fails() {
    let dir = TempDir::new().expect("temp dir");
    let (hypertensive, diabetic) = write_rosters(dir.path());
    let output = painel(&["report", &hypertensive, &diabetic, "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not confirmed"), "{stderr}");
}

#[test]
fn report_exports_unified_table() {
    let dir = TempDir::new().expect("temp dir");
    let (hypertensive, diabetic) = write_rosters(dir.path());
    let export = dir.path().join("unificado.csv");
    let export_arg = export.display().to_string();
    let output = painel(&[
        "report",
        &hypertensive,
        &diabetic,
        "--as-of",
        "2025-01-01",
        "--export",
        &export_arg,
        "--category",
        "none",
        "--yes",
    ]);
    assert!(output.status.success(), "{output:?}");

    let written = fs::read_to_string(&export).expect("read export");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines[0],
        "CNS,Address,Ultimo atendimento,Idade,Category,Neighborhood,LastVisitDate,DaysSinceVisit"
    );
    assert_eq!(lines.len(), 6);
    assert!(lines[1].ends_with("Hypertensive,Centro,2024-01-01,366"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("select at least one patient category"), "{stderr}");
}

#[test]
fn missing_roster_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let (hypertensive, _) = write_rosters(dir.path());
    let missing = dir.path().join("ausente.csv").display().to_string();
    let output = painel(&["preview", &hypertensive, &missing]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("read diabetic roster"), "{stderr}");
}

#[test]
fn preview_prints_both_rosters() {
    let dir = TempDir::new().expect("temp dir");
    let (hypertensive, diabetic) = write_rosters(dir.path());
    let output = painel(&["--color", "never", "preview", &hypertensive, &diabetic, "--rows", "2"]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hypertensive roster: first 2 of 3 rows"), "{stdout}");
    assert!(stdout.contains("Diabetic roster: first 2 of 2 rows"), "{stdout}");
}

#[test]
fn report_table_shows_warnings_chart_and_listing() {
    let dir = TempDir::new().expect("temp dir");
    let (hypertensive, diabetic) = write_rosters(dir.path());
    let output = painel(&[
        "--color",
        "never",
        "report",
        &hypertensive,
        &diabetic,
        "--as-of",
        "2026-01-01",
        "--show-records",
        "--yes",
    ]);
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning: too many patients"), "{stderr}");
    assert!(stderr.contains("(above 50%)"), "{stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("80.0%"), "{stdout}");
    assert!(
        stdout.contains("Patients per neighborhood (Hypertensive, Diabetic)"),
        "{stdout}"
    );
    let centro_bar = stdout
        .lines()
        .find(|line| line.starts_with("Centro ") && line.contains('│'))
        .expect("chart line for Centro");
    assert!(centro_bar.ends_with(" 2"), "{centro_bar}");
    assert!(stdout.contains("Patients (5 records)"), "{stdout}");
}
