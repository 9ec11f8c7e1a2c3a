pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::{FormatsConfig, TomlConfig};
    use crate::core::datetime::{
        clean_format_list, parse_format_list, DEFAULT_DATE_FORMATS, DEFAULT_TIME_FORMATS,
    };
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;

    pub const DEFAULT_OUTPUT_PATH: &str = "data/cleaned.csv";

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "clean-csv")]
    #[command(about = "Normalize a retail transactions CSV")]
    pub struct CliConfig {
        /// Input CSV file
        #[arg(long)]
        pub csv: String,

        /// Output file for the cleaned table [default: data/cleaned.csv]
        #[arg(long)]
        pub out: Option<String>,

        /// Fill missing Transaction_ID, Customer_ID and Email values
        #[arg(long)]
        pub fill_defaults: bool,

        /// Drop rows missing Amount or Email
        #[arg(long)]
        pub drop_missing: bool,

        /// Print the summary and the first rows without writing a file
        #[arg(long)]
        pub preview: bool,

        /// Comma-separated date formats to try, in order [default: %m/%d/%Y,%Y-%m-%d]
        #[arg(long)]
        pub date_formats: Option<String>,

        /// Comma-separated time formats to try, in order [default: %H:%M:%S,%H:%M]
        #[arg(long)]
        pub time_formats: Option<String>,

        /// TOML file with defaults for the options above
        #[arg(long)]
        pub config: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit log lines as JSON")]
        pub log_json: bool,

        #[arg(long, help = "Log CPU and memory usage per stage")]
        pub monitor: bool,

        /// Format lists from the config file, used when the flag is absent.
        #[arg(skip)]
        pub file_formats: FormatsConfig,
    }

    fn resolve_formats(
        flag: Option<&str>,
        file: Option<&[String]>,
        defaults: &[&str],
    ) -> Vec<String> {
        match (flag, file) {
            (Some(flag), _) => parse_format_list(Some(flag), defaults),
            (None, Some(file)) => clean_format_list(file, defaults),
            (None, None) => parse_format_list(None, defaults),
        }
    }

    impl CliConfig {
        /// Fills in whatever the command line left unset from `file`.
        pub fn apply_file_config(&mut self, file: &TomlConfig) {
            if self.out.is_none() {
                self.out = file.output.path.clone();
            }
            self.file_formats = file.formats.clone();
            self.fill_defaults |= file.cleaning.fill_defaults;
            self.drop_missing |= file.cleaning.drop_missing;
            self.preview |= file.output.preview;
            self.monitor |= file.monitoring.enabled;
        }
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &str {
            &self.csv
        }

        fn output_path(&self) -> &str {
            self.out.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
        }

        fn fill_defaults(&self) -> bool {
            self.fill_defaults
        }

        fn drop_missing(&self) -> bool {
            self.drop_missing
        }

        fn preview(&self) -> bool {
            self.preview
        }

        fn date_formats(&self) -> Vec<String> {
            resolve_formats(
                self.date_formats.as_deref(),
                self.file_formats.date.as_deref(),
                DEFAULT_DATE_FORMATS,
            )
        }

        fn time_formats(&self) -> Vec<String> {
            resolve_formats(
                self.time_formats.as_deref(),
                self.file_formats.time.as_deref(),
                DEFAULT_TIME_FORMATS,
            )
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("csv", &self.csv)?;
            if !self.preview {
                validation::validate_path("out", self.output_path())?;
            }
            validation::validate_formats("date_formats", &self.date_formats())?;
            validation::validate_formats("time_formats", &self.time_formats())?;
            Ok(())
        }
    }

}
