use crate::core::{CleanSummary, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct CleanEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> CleanEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<CleanSummary> {
        tracing::info!("Starting CSV cleaning...");
        self.monitor.log_stats("Start");

        let table = self.pipeline.extract()?;
        tracing::info!(
            "Loaded {} rows with {} columns",
            table.len(),
            table.columns.len()
        );
        self.monitor.log_stats("Extract");

        let result = self.pipeline.transform(table)?;
        tracing::info!(
            "Cleaned {} rows ({} dropped)",
            result.summary.final_rows,
            result.summary.dropped_rows
        );
        self.monitor.log_stats("Transform");

        let summary = self.pipeline.load(result)?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(summary)
    }
}
