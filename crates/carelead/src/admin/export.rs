use chrono::{DateTime, NaiveDate, Utc};

use super::record::{AdminRecord, RecordVariant};

/// Downloadable CSV of every matching record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub rows: usize,
    pub body: String,
}

impl CsvExport {
    pub fn content_type() -> mime::Mime {
        mime::TEXT_CSV
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV buffer: {0}")]
    Flush(String),
    #[error("CSV output was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub const fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// `M/D/YYYY`, the short date admins see in the dashboard.
pub fn short_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-m/%-d/%Y").to_string()
}

pub fn export_filename(variant: RecordVariant, today: NaiveDate) -> String {
    format!(
        "{}-applications-{}.csv",
        variant.slug(),
        today.format("%Y-%m-%d")
    )
}

/// Writes the header plus one row per record. Every field is quoted and embedded quotes are
/// doubled, so names and notes containing commas or quotes survive a round trip.
pub fn write_csv<R: AdminRecord>(records: &[&R]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(R::csv_header())?;
    for record in records {
        writer.write_record(record.csv_row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn export<R: AdminRecord>(
    records: &[&R],
    now: DateTime<Utc>,
) -> Result<CsvExport, ExportError> {
    Ok(CsvExport {
        filename: export_filename(R::VARIANT, now.date_naive()),
        rows: records.len(),
        body: write_csv(records)?,
    })
}
