use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:8080,http://127.0.0.1:8080"
    )]
    pub allowed_origins: Vec<String>,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8080)]
    pub port: u16,

    /// Directory served for every path that is not an API route (index.html lives here)
    #[arg(short, long, env, default_value = "./static")]
    pub static_dir: PathBuf,

    /// Interval in seconds between keep-alive comments on open event streams.
    /// Keep-alive comments are disabled when unset.
    #[arg(long, env)]
    sse_keep_alive_secs: Option<u64>,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or("0.0.0.0")
    }

    /// The `interface:port` pair the server binds to.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.interface(), self.port)
    }

    pub fn sse_keep_alive(&self) -> Option<Duration> {
        self.sse_keep_alive_secs.map(Duration::from_secs)
    }
}
