use crate::models::{Column, WideTable};
use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
    #[error("clipboard is empty")]
    Empty,
    #[error("failed to parse clipboard text: {0}")]
    Parse(#[from] csv::Error),
    #[error("clipboard has a header row but no data rows")]
    NoDataRows,
}

/// Reads the current clipboard text and parses it as a wide-format table.
/// Each call takes a fresh snapshot; nothing is cached.
pub fn read_clipboard_table() -> Result<WideTable, IngestError> {
    let text = Clipboard::new()?.get_text()?;
    parse_table(&text)
}

/// Parses delimited text with a header row into a [`WideTable`].
///
/// The delimiter is sniffed from the header line: tab (what Excel puts on
/// the clipboard), then semicolon, then comma. Ragged rows are padded or
/// truncated to the header width so all columns stay the same length.
pub fn parse_table(text: &str) -> Result<WideTable, IngestError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(IngestError::Empty);
    }

    let delimiter = sniff_delimiter(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut columns: Vec<Column> = headers
        .into_iter()
        .map(|header| Column::new(header, Vec::new()))
        .collect();

    let mut n_rows = 0usize;
    for record in reader.records() {
        let record = record?;
        for (idx, column) in columns.iter_mut().enumerate() {
            let cell = record.get(idx).unwrap_or("");
            column.cells.push(cell.to_string());
        }
        n_rows += 1;
    }

    if n_rows == 0 {
        return Err(IngestError::NoDataRows);
    }

    Ok(WideTable::from_columns(columns))
}

fn sniff_delimiter(text: &str) -> u8 {
    let header_line = text.lines().next().unwrap_or("");
    if header_line.contains('\t') {
        b'\t'
    } else if header_line.contains(';') {
        b';'
    } else {
        b','
    }
}
