use clap::Parser;
use clean_csv::utils::{logger, validation::Validate};
use clean_csv::{CleanEngine, CleanPipeline, CliConfig, EtlError, LocalStorage, TomlConfig};

fn fail(e: &EtlError) -> ! {
    tracing::error!(
        "❌ CSV cleaning failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code());
}

fn main() {
    let mut config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting clean-csv");

    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        let file_config = TomlConfig::from_file(&path)
            .and_then(|file_config| file_config.validate().map(|_| file_config));
        match file_config {
            Ok(file_config) => config.apply_file_config(&file_config),
            Err(e) => fail(&e),
        }
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail(&e);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let monitor_enabled = config.monitor;
    let pipeline = CleanPipeline::new(LocalStorage::working_dir(), config);
    let engine = CleanEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(summary) => {
            tracing::info!(
                "✅ Cleaning completed: {} rows kept, {} dropped",
                summary.final_rows,
                summary.dropped_rows
            );
        }
        Err(e) => fail(&e),
    }
}
