//! Spreadsheet sink: writes rows to a single-sheet xlsx workbook.

use std::collections::HashSet;

use rust_xlsxwriter::{Format, Workbook};

use crate::errors::AppError;
use crate::facts::models::NormalizedRow;
use crate::facts::schema::KEY_COUNT;

pub const SHEET_NAME: &str = "Output";
pub const FILE_NAME: &str = "Output.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADERS: [&str; 4] = ["#", "Key", "Value", "Comments"];
const COLUMN_WIDTHS: [f64; 4] = [5.0, 42.0, 48.0, 100.0];

/// Checks rows handed back by a caller before they are written: exactly one
/// row per key, each carrying its own canonical index. Returns them sorted.
pub fn validate_rows(mut rows: Vec<NormalizedRow>) -> Result<Vec<NormalizedRow>, AppError> {
    if rows.len() != KEY_COUNT {
        return Err(AppError::Validation(format!(
            "Expected {KEY_COUNT} rows, got {}",
            rows.len()
        )));
    }

    let mut seen = HashSet::new();
    for row in &rows {
        if row.index != row.key.index() {
            return Err(AppError::Validation(format!(
                "Row '{}' has index {} but belongs at {}",
                row.key,
                row.index,
                row.key.index()
            )));
        }
        if !seen.insert(row.key) {
            return Err(AppError::Validation(format!("Duplicate row for '{}'", row.key)));
        }
    }

    rows.sort_by_key(|row| row.index);
    Ok(rows)
}

/// Serializes rows in the order given. Empty values stay empty strings.
pub fn build_workbook(rows: &[NormalizedRow]) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *header, &header_format)?;
        sheet.set_column_width(col, width)?;
    }

    for (offset, row) in rows.iter().enumerate() {
        let line = offset as u32 + 1;
        sheet.write_number(line, 0, row.index as f64)?;
        sheet.write_string(line, 1, row.key.as_str())?;
        sheet.write_string(line, 2, &row.value)?;
        sheet.write_string(line, 3, &row.comments)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::backfill::BackfillOptions;
    use crate::facts::assemble::assemble_rows;
    use crate::facts::models::SourceText;
    use crate::facts::reconcile::reconcile;

    fn full_rows() -> Vec<NormalizedRow> {
        assemble_rows(
            reconcile(Vec::new()),
            SourceText::new(""),
            &BackfillOptions::default(),
        )
    }

    #[test]
    fn test_workbook_is_a_zip_container() {
        let bytes = build_workbook(&full_rows()).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_validate_rows_sorts_by_index() {
        let mut rows = full_rows();
        rows.reverse();
        let sorted = validate_rows(rows).unwrap();
        assert_eq!(sorted[0].index, 1);
        assert_eq!(sorted[KEY_COUNT - 1].index, KEY_COUNT);
    }

    #[test]
    fn test_validate_rows_rejects_missing_rows() {
        let mut rows = full_rows();
        rows.pop();
        assert!(matches!(validate_rows(rows), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rows_rejects_duplicates_and_bad_index() {
        let mut rows = full_rows();
        rows[1] = rows[0].clone();
        assert!(matches!(validate_rows(rows), Err(AppError::Validation(_))));

        let mut rows = full_rows();
        rows[0].index = 2;
        assert!(matches!(validate_rows(rows), Err(AppError::Validation(_))));
    }
}
