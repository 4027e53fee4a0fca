// src/export.rs

use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::models::{participant::Participant, quiz::TOTAL_QUESTIONS};

pub const SHEET_NAME: &str = "Participants";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXPORT_FILENAME: &str = "participants.xlsx";

const SCORE_HEADER: &str = "Score / 7";
const HEADERS: [&str; 5] = ["Name", "Email", "Phone", SCORE_HEADER, "Date"];
const COLUMN_WIDTHS: [f64; 5] = [24.0, 32.0, 16.0, 10.0, 24.0];

/// One spreadsheet row, already formatted for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub score: String,
    pub date: String,
}

impl ExportRow {
    fn cells(&self) -> [&str; 5] {
        [
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.score.as_str(),
            self.date.as_str(),
        ]
    }
}

impl From<&Participant> for ExportRow {
    fn from(p: &Participant) -> Self {
        Self {
            name: p.name.clone().unwrap_or_default(),
            email: p.email.clone(),
            phone: p.number.clone().unwrap_or_default(),
            score: format!("{} / {}", p.score, TOTAL_QUESTIONS),
            date: p.completed_at.map(format_date).unwrap_or_default(),
        }
    }
}

/// `M/D/YYYY, h:mm:ss AM` in UTC.
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub fn rows(participants: &[Participant]) -> Vec<ExportRow> {
    participants.iter().map(ExportRow::from).collect()
}

/// Serializes `rows` into an `.xlsx` workbook with a single "Participants" sheet.
pub fn workbook_bytes(rows: &[ExportRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, (title, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &header)?;
        sheet.set_column_width(col, width)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (col, value) in row.cells().into_iter().enumerate() {
            sheet.write_string(r, col as u16, value)?;
        }
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::Answers;
    use chrono::TimeZone;
    use sqlx::types::Json;

    fn participant(score: i64, completed_at: Option<DateTime<Utc>>) -> Participant {
        Participant {
            id: 1,
            email: "asha@example.com".into(),
            name: Some("Asha".into()),
            number: None,
            score,
            answers: Json(Answers::new()),
            completed_at,
        }
    }

    #[test]
    fn row_renders_score_over_seven() {
        let at = Utc.with_ymd_and_hms(2026, 1, 7, 15, 4, 5).unwrap();
        let row = ExportRow::from(&participant(4, Some(at)));

        assert_eq!(row.score, "4 / 7");
        assert_eq!(row.date, "1/7/2026, 3:04:05 PM");
        assert_eq!(row.phone, "");
    }

    #[test]
    fn missing_completion_leaves_date_blank() {
        let row = ExportRow::from(&participant(0, None));
        assert_eq!(row.date, "");
        assert_eq!(row.score, "0 / 7");
    }

    #[test]
    fn rows_match_participants_one_to_one() {
        let people = vec![participant(1, None), participant(2, None), participant(3, None)];
        assert_eq!(rows(&people).len(), people.len());
    }

    #[test]
    fn workbook_is_a_zip_container() {
        let bytes = workbook_bytes(&rows(&[participant(5, None)])).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
