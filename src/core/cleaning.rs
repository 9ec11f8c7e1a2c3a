//! Column-level cleaning steps over an in-memory [`Table`].
//!
//! Every step looks its column up by name and does nothing when the input
//! never declared it.

use crate::domain::model::{Cell, Table};
use uuid::Uuid;

pub const DATE_COLUMN: &str = "Date";
pub const TIME_COLUMN: &str = "Time";
pub const TRANSACTION_ID_COLUMN: &str = "Transaction_ID";
pub const CUSTOMER_ID_COLUMN: &str = "Customer_ID";
pub const EMAIL_COLUMN: &str = "Email";
pub const AMOUNT_COLUMN: &str = "Amount";

pub const NUMERIC_COLUMNS: &[&str] = &[
    "Item_Price",
    AMOUNT_COLUMN,
    "Total_Amount",
    "Total_Purchases",
    "Ratings",
];

pub const UNKNOWN_CUSTOMER_ID: &str = "unknown";
pub const UNKNOWN_EMAIL: &str = "unknown@example.com";

/// Normalized values for one column, held back until the row set is final.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingColumn {
    column: &'static str,
    values: Vec<Option<String>>,
}

impl PendingColumn {
    /// Runs `normalize` over every text cell of `column`. `None` when the
    /// column is absent.
    pub fn parse(
        table: &Table,
        column: &'static str,
        normalize: impl Fn(&str) -> Option<String>,
    ) -> Option<Self> {
        let index = table.column_index(column)?;
        let values = table
            .rows
            .iter()
            .map(|row| row[index].as_text().and_then(&normalize))
            .collect();
        Some(Self { column, values })
    }

    pub fn normalized_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    pub fn retain(&mut self, keep: &[bool]) {
        let mut flags = keep.iter();
        self.values.retain(|_| flags.next().copied().unwrap_or(true));
    }

    /// Overwrites the cells that parsed; the rest keep their original text.
    pub fn commit(self, table: &mut Table) {
        let Some(index) = table.column_index(self.column) else {
            return;
        };
        for (row, value) in table.rows.iter_mut().zip(self.values) {
            if let Some(value) = value {
                row[index] = Cell::Text(value);
            }
        }
    }
}

pub fn trim_whitespace(table: &mut Table) {
    for cell in table.rows.iter_mut().flatten() {
        if let Cell::Text(text) = cell {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
        }
    }
}

/// Replaces every missing cell of `column` with `make()`. Returns how many
/// cells were filled.
fn fill_column(table: &mut Table, column: &str, mut make: impl FnMut() -> String) -> usize {
    let Some(index) = table.column_index(column) else {
        return 0;
    };
    let mut filled = 0;
    for row in table.rows.iter_mut() {
        if row[index].is_missing() {
            row[index] = Cell::Text(make());
            filled += 1;
        }
    }
    filled
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    pub transaction_ids: usize,
    pub customer_ids: usize,
    pub emails: usize,
}

/// Synthesizes identifiers: a fresh v4 UUID per missing transaction and
/// fixed placeholders for customers and emails.
pub fn fill_defaults(table: &mut Table) -> FillReport {
    FillReport {
        transaction_ids: fill_column(table, TRANSACTION_ID_COLUMN, || {
            Uuid::new_v4().to_string()
        }),
        customer_ids: fill_column(table, CUSTOMER_ID_COLUMN, || UNKNOWN_CUSTOMER_ID.to_string()),
        emails: fill_column(table, EMAIL_COLUMN, || UNKNOWN_EMAIL.to_string()),
    }
}

/// Drops rows whose `Amount` or `Email` is missing and returns the keep mask
/// computed before dropping.
pub fn drop_incomplete(table: &mut Table) -> Vec<bool> {
    let amount = table.column_index(AMOUNT_COLUMN);
    let email = table.column_index(EMAIL_COLUMN);

    let keep: Vec<bool> = table
        .rows
        .iter()
        .map(|row| {
            let amount_missing = amount.is_some_and(|index| row[index].is_missing());
            let email_missing = email.is_some_and(|index| row[index].is_missing());
            !(amount_missing || email_missing)
        })
        .collect();

    let mut flags = keep.iter();
    table.rows.retain(|_| flags.next().copied().unwrap_or(true));
    keep
}

fn coerce_number(cell: &Cell) -> Cell {
    match cell {
        Cell::Number(value) if !value.is_nan() => Cell::Number(*value),
        Cell::Text(text) => match text.trim().parse::<f64>() {
            Ok(value) if !value.is_nan() => Cell::Number(value),
            _ => Cell::Missing,
        },
        _ => Cell::Missing,
    }
}

/// Converts the numeric columns in place. Returns how many non-missing cells
/// failed to parse and became `Missing`.
pub fn coerce_numeric(table: &mut Table) -> usize {
    let mut rejected = 0;
    for column in NUMERIC_COLUMNS {
        let Some(index) = table.column_index(column) else {
            continue;
        };
        for row in table.rows.iter_mut() {
            let coerced = coerce_number(&row[index]);
            if coerced == Cell::Missing && !row[index].is_missing() {
                rejected += 1;
            }
            row[index] = coerced;
        }
    }
    rejected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table
                .rows
                .push(row.iter().map(|v| Cell::Text(v.to_string())).collect());
        }
        table
    }

    fn text(table: &Table, row: usize, column: &str) -> Option<String> {
        let index = table.column_index(column)?;
        table.rows[row][index].as_text().map(str::to_string)
    }

    #[test]
    fn test_trim_whitespace_only_touches_text() {
        let mut t = table(&["Name", "Amount"], &[&["  Ann ", "\t12.5\n"]]);
        t.rows[0][1] = Cell::Number(3.0);
        trim_whitespace(&mut t);
        assert_eq!(text(&t, 0, "Name").as_deref(), Some("Ann"));
        assert_eq!(t.rows[0][1], Cell::Number(3.0));
        assert_eq!(t.columns, vec!["Name", "Amount"]);
    }

    #[test]
    fn test_pending_column_commits_only_parsed_values() {
        let mut t = table(&["Date"], &[&["1"], &["x"], &[""]]);
        let pending = PendingColumn::parse(&t, DATE_COLUMN, |v| {
            (v == "1").then(|| "2023-01-01".to_string())
        })
        .unwrap();
        assert_eq!(pending.normalized_count(), 1);

        pending.commit(&mut t);
        assert_eq!(text(&t, 0, "Date").as_deref(), Some("2023-01-01"));
        assert_eq!(text(&t, 1, "Date").as_deref(), Some("x"));
        assert_eq!(text(&t, 2, "Date").as_deref(), Some(""));
    }

    #[test]
    fn test_pending_column_absent() {
        let t = table(&["Amount"], &[&["1"]]);
        assert!(PendingColumn::parse(&t, TIME_COLUMN, |v| Some(v.to_string())).is_none());
    }

    #[test]
    fn test_fill_defaults() {
        let mut t = table(
            &["Transaction_ID", "Customer_ID", "Email"],
            &[
                &["", "nan", ""],
                &["T-1", "C-1", "a@b.com"],
                &["NaN", "", "  "],
            ],
        );
        trim_whitespace(&mut t);
        let report = fill_defaults(&mut t);

        assert_eq!(
            report,
            FillReport {
                transaction_ids: 2,
                customer_ids: 2,
                emails: 2
            }
        );
        assert_eq!(text(&t, 1, "Transaction_ID").as_deref(), Some("T-1"));
        assert_eq!(text(&t, 0, "Customer_ID").as_deref(), Some(UNKNOWN_CUSTOMER_ID));
        assert_eq!(text(&t, 2, "Email").as_deref(), Some(UNKNOWN_EMAIL));

        let first = text(&t, 0, "Transaction_ID").unwrap();
        let second = text(&t, 2, "Transaction_ID").unwrap();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert!(Uuid::parse_str(&second).is_ok());
    }

    #[test]
    fn test_fill_defaults_skips_absent_columns() {
        let mut t = table(&["Amount"], &[&[""]]);
        assert_eq!(fill_defaults(&mut t), FillReport::default());
        assert_eq!(t.columns, vec!["Amount"]);
    }

    #[test]
    fn test_drop_incomplete() {
        let mut t = table(
            &["Amount", "Email"],
            &[
                &["10", "a@b.com"],
                &["", "a@b.com"],
                &["5", "nan"],
                &["abc", "c@d.com"],
            ],
        );
        let keep = drop_incomplete(&mut t);
        assert_eq!(keep, vec![true, false, false, true]);
        assert_eq!(t.len(), 2);
        assert_eq!(text(&t, 1, "Amount").as_deref(), Some("abc"));
    }

    #[test]
    fn test_drop_incomplete_without_amount_column() {
        let mut t = table(&["Email"], &[&["a@b.com"], &[""]]);
        drop_incomplete(&mut t);
        assert_eq!(t.len(), 1);

        let mut t = table(&["Name"], &[&[""], &[""]]);
        drop_incomplete(&mut t);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_pending_column_follows_dropped_rows() {
        let mut t = table(&["Date", "Amount"], &[&["a", ""], &["b", "1"]]);
        let mut pending =
            PendingColumn::parse(&t, DATE_COLUMN, |v| Some(v.to_uppercase())).unwrap();
        let keep = drop_incomplete(&mut t);
        pending.retain(&keep);
        pending.commit(&mut t);
        assert_eq!(t.len(), 1);
        assert_eq!(text(&t, 0, "Date").as_deref(), Some("B"));
    }

    #[test]
    fn test_coerce_numeric() {
        let mut t = table(
            &["Amount", "Ratings", "Name"],
            &[&["12.5", "4", "7"], &["abc", "", "x"], &["nan", "1e2", "y"]],
        );
        let rejected = coerce_numeric(&mut t);

        assert_eq!(rejected, 1);
        assert_eq!(t.rows[0][0], Cell::Number(12.5));
        assert_eq!(t.rows[0][1], Cell::Number(4.0));
        assert_eq!(t.rows[1][0], Cell::Missing);
        assert_eq!(t.rows[1][1], Cell::Missing);
        assert_eq!(t.rows[2][0], Cell::Missing);
        assert_eq!(t.rows[2][1], Cell::Number(100.0));
        assert_eq!(text(&t, 0, "Name").as_deref(), Some("7"));
    }
}
