use std::io::Write;

use painel_ingest::{IngestError, read_roster};
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn reads_comma_separated_roster() {
    let file = create_temp_csv(
        "CNS,Endereço,Último atendimento\n\
         111,\"Rua A, 10 - Centro, Porto Alegre - RS\",15/03/2024\n\
         222,,01/01/2023\n",
    );
    let table = read_roster(file.path()).unwrap();

    assert_eq!(table.headers, vec!["CNS", "Endereço", "Último atendimento"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, 1), "Rua A, 10 - Centro, Porto Alegre - RS");
    assert_eq!(table.cell(1, 1), "");
}

#[test]
fn reads_semicolon_roster_with_bom_and_blank_lines() {
    let file = create_temp_csv("\u{feff}CNS;Endereço;Data\n\n111;Rua B;02/02/2024\n;;\n222;Rua C;03/03/2024\n");
    let table = read_roster(file.path()).unwrap();

    assert_eq!(table.headers, vec!["CNS", "Endereço", "Data"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[1], vec!["222", "Rua C", "03/03/2024"]);
}

#[test]
fn pads_short_rows() {
    let file = create_temp_csv("A,B,C,D\n1,2\n");
    let table = read_roster(file.path()).unwrap();

    assert_eq!(table.rows[0], vec!["1", "2", "", ""]);
}

#[test]
fn empty_file_is_an_error() {
    let file = create_temp_csv("\n\n");
    let result = read_roster(file.path());

    assert!(matches!(result, Err(IngestError::EmptyFile { .. })));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_roster(&dir.path().join("missing.csv"));

    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn reads_windows_1252_export() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"CNS;Endere\xe7o;Data\n111;Rua A 1 - Gl\xf3ria, Porto Alegre - RS;15/03/2024\n")
        .unwrap();
    let table = read_roster(file.path()).unwrap();

    assert_eq!(table.headers, vec!["CNS", "Endereço", "Data"]);
    assert_eq!(table.cell(0, 1), "Rua A 1 - Glória, Porto Alegre - RS");
}

#[test]
fn reads_first_sheet_of_workbook() {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hipertensos.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    for (column, header) in ["CNS", "Endereço", "Último atendimento", "Idade"]
        .into_iter()
        .enumerate()
    {
        sheet.write_string(0, column as u16, header).unwrap();
    }
    sheet.write_string(1, 0, "111").unwrap();
    sheet
        .write_string(1, 1, "Rua A, 10 - Centro, Porto Alegre - RS")
        .unwrap();
    let visit = ExcelDateTime::from_ymd(2024, 3, 15).unwrap();
    sheet
        .write_datetime_with_format(1, 2, &visit, &date_format)
        .unwrap();
    sheet.write_number(1, 3, 61).unwrap();
    sheet.write_string(2, 0, "222").unwrap();
    sheet.write_string(2, 2, "01/01/2023").unwrap();
    workbook.save(&path).unwrap();

    let table = read_roster(&path).unwrap();

    assert_eq!(
        table.headers,
        vec!["CNS", "Endereço", "Último atendimento", "Idade"]
    );
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.rows[0],
        vec![
            "111",
            "Rua A, 10 - Centro, Porto Alegre - RS",
            "15/03/2024",
            "61"
        ]
    );
    assert_eq!(table.rows[1], vec!["222", "", "01/01/2023", ""]);
}

#[test]
fn unreadable_workbook_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrompido.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    assert!(matches!(
        read_roster(&path),
        Err(IngestError::Workbook { .. })
    ));
}
