use rust_decimal::{Decimal, RoundingStrategy};

use crate::table::{Cell, ReportTable};
use crate::ReportError;

const BOM: char = '\u{feff}';
pub(crate) const DATE_FORMAT: &str = "%m/%d/%Y, %I:%M %p";

/// Render as CSV: UTF-8 BOM, header line, `\n` separators, no trailing newline.
///
/// Fields are quoted only when they contain a delimiter, quote or line break.
pub(crate) fn render(table: &ReportTable) -> Result<String, ReportError> {
    let mut writer = ::csv::WriterBuilder::new()
        .quote_style(::csv::QuoteStyle::Necessary)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(table.columns.iter().map(|c| c.header))
        .map_err(csv_error)?;
    for row in &table.rows {
        writer
            .write_record(row.cells.iter().map(cell_text))
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.to_string()))?;
    let body = String::from_utf8_lossy(&bytes);

    let mut out = String::with_capacity(body.len() + BOM.len_utf8());
    out.push(BOM);
    out.push_str(body.strip_suffix('\n').unwrap_or(&body));
    Ok(out)
}

fn csv_error(e: ::csv::Error) -> ReportError {
    ReportError::Csv(e.to_string())
}

pub(crate) fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.clone(),
        Cell::Integer(n) => n.to_string(),
        Cell::Number(n) => n.to_string(),
        Cell::Currency(d) => money(*d),
        Cell::Timestamp(ts) => ts.format(DATE_FORMAT).to_string(),
    }
}

pub(crate) fn money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
