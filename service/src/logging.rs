use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{self, ConfigBuilder};

/// Modules to filter out from logging when not in Trace mode.
/// The HTTP stack logs every request and connection, which drowns out the
/// register/unregister/broadcast lines we care about.
const FILTERED_MODULES: &[&str] = &["tower", "tower_http", "hyper", "hyper_util", "axum"];

pub struct Logger {}

impl Logger {
    /// Initializes the global logger with configuration based on the provided Config.
    ///
    /// When the log level is set to Trace, all logs including dependency logs are shown.
    /// For all other log levels, verbose dependency logs are filtered out.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        simplelog::TermLogger::init(
            config.log_level_filter,
            Self::build_log_config(config.log_level_filter),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )
    }

    /// Module prefixes suppressed at `level`: none at Trace, the HTTP stack otherwise.
    fn ignored_modules(level: LevelFilter) -> &'static [&'static str] {
        if level == LevelFilter::Trace {
            &[]
        } else {
            FILTERED_MODULES
        }
    }

    fn build_log_config(level: LevelFilter) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        for module in Self::ignored_modules(level) {
            builder.add_filter_ignore_str(module);
        }

        builder.build()
    }
}
