//! Client-side export of the filtered farmer list
//!
//! All formats share the fixed column order of [`COLUMN_ORDER`] and write `-`
//! for absent values.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde_json::{Map, Value};

use crate::petani::{PetaniRecord, COLUMN_ORDER};
use crate::{Error, Result};

pub const EMPTY_EXPORT: &str = "Tidak ada data untuk diekspor.";
pub const SHEET_NAME: &str = "Data Petani";
const FILE_STEM: &str = "data_petani_lengkap";
const COLUMN_WIDTH: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Json => "json",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", FILE_STEM, self.extension())
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Json => "application/json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Excel => "Excel",
            ExportFormat::Json => "JSON",
        }
    }
}

/// Records projected onto the export columns
pub fn export_rows<'a, I>(records: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = &'a PetaniRecord>,
{
    records
        .into_iter()
        .map(|r| COLUMN_ORDER.iter().map(|c| r.display(c, "-")).collect())
        .collect()
}

fn escape_field(field: &str) -> String {
    let needs_quoting = field.contains(',')
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r');

    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line(fields: impl Iterator<Item = impl AsRef<str>>) -> String {
    fields
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// UTF-8 BOM so spreadsheet apps pick the right encoding
pub fn to_csv(rows: &[Vec<String>]) -> String {
    let mut out = String::from('\u{feff}');
    out.push_str(&csv_line(COLUMN_ORDER.iter()));
    for row in rows {
        out.push('\n');
        out.push_str(&csv_line(row.iter()));
    }
    out
}

pub fn to_json(rows: &[Vec<String>]) -> Result<String> {
    let objects: Vec<Value> = rows
        .iter()
        .map(|row| {
            let map: Map<String, Value> = COLUMN_ORDER
                .iter()
                .zip(row)
                .map(|(k, v)| (k.to_string(), Value::from(v.as_str())))
                .collect();
            Value::Object(map)
        })
        .collect();
    Ok(serde_json::to_string_pretty(&objects)?)
}

pub fn to_xlsx(rows: &[Vec<String>]) -> Result<Vec<u8>> {
    write_workbook(rows).map_err(|e| Error::Export(format!("Gagal membuat file Excel: {}", e)))
}

fn write_workbook(rows: &[Vec<String>]) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMN_ORDER.iter().enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, COLUMN_WIDTH)?;
        sheet.write_string_with_format(0, col, *name, &header)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            sheet.write_string(r as u32 + 1, col as u16, value)?;
        }
    }
    workbook.save_to_buffer()
}

/// Serialize the filtered records in the chosen format
pub fn export<'a, I>(records: I, format: ExportFormat) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a PetaniRecord>,
{
    let rows = export_rows(records);
    if rows.is_empty() {
        return Err(Error::Export(EMPTY_EXPORT.to_string()));
    }
    match format {
        ExportFormat::Csv => Ok(to_csv(&rows).into_bytes()),
        ExportFormat::Json => Ok(to_json(&rows)?.into_bytes()),
        ExportFormat::Excel => to_xlsx(&rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<PetaniRecord> {
        vec![
            PetaniRecord::from_value(json!({"NO": 1, "NAMA": "Budi", "USIA": 40})),
            PetaniRecord::from_value(json!({
                "NO": 2,
                "NAMA": "Siti, S.P.",
                "CATATAN": "kata \"rajin\""
            })),
        ]
    }

    #[test]
    fn test_export_rows_fill_all_columns() {
        let rows = export_rows(&records());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 43));
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[0][10], "Budi");
        assert_eq!(rows[0][12], "40");
        assert_eq!(rows[0][1], "-");
    }

    #[test]
    fn test_csv_has_bom_header_and_quoting() {
        let csv = to_csv(&export_rows(&records()));
        assert!(csv.starts_with("\u{feff}NO,KECAMATAN,DESA"));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("\"Siti, S.P.\""));
        assert!(lines[2].ends_with("\"kata \"\"rajin\"\"\""));
    }

    #[test]
    fn test_json_keeps_column_order() {
        let out = to_json(&export_rows(&records())).unwrap();
        let parsed: Vec<Map<String, Value>> = serde_json::from_str(&out).unwrap();
        let keys: Vec<&String> = parsed[0].keys().collect();
        assert_eq!(keys.len(), 43);
        assert_eq!(keys[0], "NO");
        assert_eq!(keys[42], "CATATAN");
        assert_eq!(parsed[1]["CATATAN"], json!("kata \"rajin\""));
        assert!(out.contains("\n  {"));
    }

    #[test]
    fn test_xlsx_is_a_zip_container() {
        let bytes = export(&records(), ExportFormat::Excel).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_empty_export_is_rejected() {
        let none: Vec<PetaniRecord> = Vec::new();
        let err = export(&none, ExportFormat::Csv).unwrap_err();
        assert_eq!(err.to_string(), EMPTY_EXPORT);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ExportFormat::Csv.file_name(), "data_petani_lengkap.csv");
        assert_eq!(ExportFormat::Excel.file_name(), "data_petani_lengkap.xlsx");
        assert_eq!(ExportFormat::Json.file_name(), "data_petani_lengkap.json");
    }
}
