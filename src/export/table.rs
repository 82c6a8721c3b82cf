//! A plain rows-of-cells table and its CSV rendering.

use std::io;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::EngineResult;

/// A named grid of text cells.
///
/// Rows may have different lengths; blank spacer rows are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Sheet name shown to the user.
    pub name: String,
    /// The cells, row by row.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Appends an empty spacer row.
    pub fn push_blank(&mut self) {
        self.rows.push(Vec::new());
    }
}

/// Formats an amount with two fraction digits, rounding halves away from zero.
///
/// # Examples
///
/// ```
/// use gratuity_engine::export::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(90909, 3)), "90.91");
/// assert_eq!(format_amount(Decimal::new(125, 0)), "125.00");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Formats an amount as currency: `$` followed by two fraction digits.
///
/// ```
/// use gratuity_engine::export::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(3333333, 5)), "$33.33");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format!("${}", format_amount(value))
}

/// Formats points without trailing zeros.
pub fn format_points(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Writes the table as CSV.
pub fn write_csv<W: io::Write>(table: &Table, writer: W) -> EngineResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    for row in &table.rows {
        if row.is_empty() {
            csv_writer.write_record([""])?;
        } else {
            csv_writer.write_record(row)?;
        }
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Renders the table as a CSV string.
pub fn to_csv_string(table: &Table) -> EngineResult<String> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
