use serde::Serialize;

/// A single table value. Everything is loaded as `Text`; only the numeric
/// columns are turned into `Number` or `Missing` during cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    /// The one missingness rule used by filling, dropping and the summary.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Text(text) => is_missing_text(text),
            Cell::Number(value) => value.is_nan(),
            Cell::Missing => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// CSV field form: missing values are empty, numbers use the shortest
    /// representation that reads back to the same value.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => value.to_string(),
            Cell::Missing => String::new(),
        }
    }
}

pub fn is_missing_text(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// `None` when the input never declared the column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count_missing(&self, name: &str) -> usize {
        match self.column_index(name) {
            Some(index) => self.rows.iter().filter(|row| row[index].is_missing()).count(),
            None => 0,
        }
    }

    /// The first `limit` rows as objects keyed by column name, in header order.
    pub fn head_records(&self, limit: usize) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .take(limit)
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(column, cell)| {
                        let value = serde_json::to_value(cell).unwrap_or(serde_json::Value::Null);
                        (column.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    pub original_rows: usize,
    pub final_rows: usize,
    pub dropped_rows: usize,
    pub missing_transaction_ids_after: usize,
    pub missing_customer_ids_after: usize,
    pub missing_emails_after: usize,
}

#[derive(Debug, Clone)]
pub struct CleanResult {
    pub table: Table,
    pub summary: CleanSummary,
}
