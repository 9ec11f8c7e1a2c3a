use crate::core::cleaning::{
    self, PendingColumn, CUSTOMER_ID_COLUMN, DATE_COLUMN, EMAIL_COLUMN, TIME_COLUMN,
    TRANSACTION_ID_COLUMN,
};
use crate::core::datetime::{normalize_date, normalize_time};
use crate::core::{Cell, CleanResult, CleanSummary, ConfigProvider, Pipeline, Storage, Table};
use crate::utils::error::{EtlError, Result};

const PREVIEW_ROWS: usize = 5;

pub struct CleanPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CleanPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// Reads a header row plus records, keeping every field as text.
pub fn read_table(data: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if columns.is_empty() || columns.iter().all(|column| column.is_empty()) {
        return Err(EtlError::processing("input has no header row"));
    }

    let mut table = Table::new(columns);
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > table.columns.len() {
            return Err(EtlError::processing(format!(
                "record {} has {} fields, header declares {}",
                line + 1,
                record.len(),
                table.columns.len()
            )));
        }

        let mut row: Vec<Cell> = record
            .iter()
            .map(|field| Cell::Text(field.to_string()))
            .collect();
        row.resize(table.columns.len(), Cell::Missing);
        table.rows.push(row);
    }

    Ok(table)
}

/// Header first, columns in their original order.
pub fn write_table(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(Cell::to_field))?;
    }
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

fn summarize(table: &Table, original_rows: usize, dropped_rows: usize) -> CleanSummary {
    CleanSummary {
        original_rows,
        final_rows: table.len(),
        dropped_rows,
        missing_transaction_ids_after: table.count_missing(TRANSACTION_ID_COLUMN),
        missing_customer_ids_after: table.count_missing(CUSTOMER_ID_COLUMN),
        missing_emails_after: table.count_missing(EMAIL_COLUMN),
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for CleanPipeline<S, C> {
    fn extract(&self) -> Result<Table> {
        let path = self.config.input_path();
        tracing::debug!("Reading input table from: {}", path);

        let data = self.storage.read_file(path)?;
        let table = read_table(&data)?;

        tracing::debug!("Columns: {:?}", table.columns);
        Ok(table)
    }

    fn transform(&self, mut table: Table) -> Result<CleanResult> {
        let original_rows = table.len();

        cleaning::trim_whitespace(&mut table);

        let date_formats = self.config.date_formats();
        let time_formats = self.config.time_formats();
        let mut dates = PendingColumn::parse(&table, DATE_COLUMN, |value| {
            normalize_date(value, &date_formats)
        });
        let mut times = PendingColumn::parse(&table, TIME_COLUMN, |value| {
            normalize_time(value, &time_formats)
        });
        if let Some(dates) = &dates {
            tracing::debug!("Normalized {} of {} dates", dates.normalized_count(), original_rows);
        }
        if let Some(times) = &times {
            tracing::debug!("Normalized {} of {} times", times.normalized_count(), original_rows);
        }

        if self.config.fill_defaults() {
            let filled = cleaning::fill_defaults(&mut table);
            tracing::debug!(
                "Filled {} transaction ids, {} customer ids, {} emails",
                filled.transaction_ids,
                filled.customer_ids,
                filled.emails
            );
        }

        let dropped_rows = if self.config.drop_missing() {
            let keep = cleaning::drop_incomplete(&mut table);
            for pending in [&mut dates, &mut times].into_iter().flatten() {
                pending.retain(&keep);
            }
            original_rows - table.len()
        } else {
            0
        };
        if dropped_rows > 0 {
            tracing::info!("Dropped {} rows missing Amount or Email", dropped_rows);
        }

        for pending in [dates, times].into_iter().flatten() {
            pending.commit(&mut table);
        }

        let rejected = cleaning::coerce_numeric(&mut table);
        if rejected > 0 {
            tracing::debug!("{} numeric cells could not be parsed and were cleared", rejected);
        }

        let summary = summarize(&table, original_rows, dropped_rows);
        Ok(CleanResult { table, summary })
    }

    fn load(&self, result: CleanResult) -> Result<CleanSummary> {
        let summary_json = serde_json::to_string(&result.summary)?;

        if self.config.preview() {
            let sample = serde_json::to_string(&result.table.head_records(PREVIEW_ROWS))?;
            println!("Preview summary (no file written):");
            println!("{}", summary_json);
            println!("Sample rows (first {}):", PREVIEW_ROWS);
            println!("{}", sample);
            return Ok(result.summary);
        }

        let output_path = self.config.output_path();
        let data = write_table(&result.table)?;
        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        self.storage.write_file(output_path, &data)?;

        println!("Wrote cleaned file to: {}", output_path);
        println!("Summary: {}", summary_json);
        Ok(result.summary)
    }
}
