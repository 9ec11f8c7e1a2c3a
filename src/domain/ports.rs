use crate::domain::model::{CleanResult, CleanSummary, Table};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Creates any missing parent directories before writing.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn fill_defaults(&self) -> bool;
    fn drop_missing(&self) -> bool;
    fn preview(&self) -> bool;
    /// Tried in order; the first full match wins.
    fn date_formats(&self) -> Vec<String>;
    fn time_formats(&self) -> Vec<String>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Table>;
    fn transform(&self, table: Table) -> Result<CleanResult>;
    fn load(&self, result: CleanResult) -> Result<CleanSummary>;
}
