pub mod cleaning;
pub mod datetime;
pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{Cell, CleanResult, CleanSummary, Table};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
