use std::collections::HashMap;
use log::{debug, info, LevelFilter};
use serde::{Deserialize, Serialize};
use env_logger::{Builder, Target, WriteStyle};
use std::io::Write;

/// Available logging subsystems in chartmatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoggingSubsystem {
    /// Main application logging
    #[serde(rename = "main")]
    Main,
    /// Normalization, matching and resolution
    #[serde(rename = "matching")]
    Matching,
    /// Spotify token and search
    #[serde(rename = "spotify")]
    Spotify,
    /// Preview lookups
    #[serde(rename = "preview")]
    Preview,
    /// HTTP client operations
    #[serde(rename = "http")]
    Http,
    /// Chart file I/O
    #[serde(rename = "io")]
    Io,
    /// Configuration loading and parsing
    #[serde(rename = "config")]
    Config,
}

impl LoggingSubsystem {
    /// Get the module prefix for this subsystem
    pub fn module_prefix(&self) -> &'static str {
        match self {
            LoggingSubsystem::Main => "chartmatch",
            LoggingSubsystem::Matching => "chartmatch::matching",
            LoggingSubsystem::Spotify => "chartmatch::helpers::spotify",
            LoggingSubsystem::Preview => "chartmatch::helpers::preview,chartmatch::helpers::retry",
            LoggingSubsystem::Http => "chartmatch::helpers::http_client,ureq",
            LoggingSubsystem::Io => "chartmatch::helpers::chart_store",
            LoggingSubsystem::Config => "chartmatch::config",
        }
    }

    /// Parse subsystem name to enum
    pub fn parse(name: &str) -> Option<LoggingSubsystem> {
        match name.to_lowercase().as_str() {
            "main" => Some(LoggingSubsystem::Main),
            "matching" => Some(LoggingSubsystem::Matching),
            "spotify" => Some(LoggingSubsystem::Spotify),
            "preview" => Some(LoggingSubsystem::Preview),
            "http" => Some(LoggingSubsystem::Http),
            "io" => Some(LoggingSubsystem::Io),
            "config" => Some(LoggingSubsystem::Config),
            _ => None,
        }
    }
}

/// Logging configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Target for log output (stdout, stderr)
    #[serde(default = "default_target")]
    pub target: String,

    /// Whether to include timestamps
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,

    /// Whether to use colored output
    #[serde(default = "default_colors")]
    pub colors: bool,

    /// Subsystem-specific log levels
    #[serde(default)]
    pub subsystems: HashMap<String, String>,

    /// Whether to include module paths in log output
    #[serde(default)]
    pub include_module_path: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_target() -> String {
    "stderr".to_string()
}

fn default_timestamps() -> bool {
    true
}

fn default_colors() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            target: default_target(),
            timestamps: default_timestamps(),
            colors: default_colors(),
            subsystems: HashMap::new(),
            include_module_path: false,
        }
    }
}

impl LoggingConfig {
    /// Convert string log level to LevelFilter
    fn parse_log_level(level: &str) -> LevelFilter {
        match level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => {
                eprintln!("Warning: Unknown log level '{}', defaulting to 'info'", level);
                LevelFilter::Info
            }
        }
    }

    /// Module filters as (module, level) pairs
    fn module_filters(&self) -> Vec<(String, String)> {
        let mut filters = Vec::new();
        let mut names: Vec<&String> = self.subsystems.keys().collect();
        names.sort();
        for name in names {
            let level = &self.subsystems[name];
            match LoggingSubsystem::parse(name) {
                Some(subsystem) => {
                    for prefix in subsystem.module_prefix().split(',') {
                        filters.push((prefix.trim().to_string(), level.clone()));
                    }
                }
                // Allow custom module specifications
                None => filters.push((name.clone(), level.clone())),
            }
        }
        filters
    }

    /// Build the environment filter string for env_logger
    pub fn build_filter_string(&self) -> String {
        let mut filter_parts = vec![self.level.clone()];
        for (module, level) in self.module_filters() {
            filter_parts.push(format!("{}={}", module, level));
        }
        filter_parts.join(",")
    }

    /// Initialize the logger with this configuration
    pub fn initialize_logger(&self) -> Result<(), String> {
        let filter_string = self.build_filter_string();

        let mut builder = Builder::new();
        builder.filter(None, Self::parse_log_level(&self.level));
        for (module, level) in self.module_filters() {
            builder.filter(Some(&module), Self::parse_log_level(&level));
        }

        // RUST_LOG wins over the configuration file
        builder.parse_env("RUST_LOG");

        let write_style = if self.colors {
            WriteStyle::Auto
        } else {
            WriteStyle::Never
        };
        builder.write_style(write_style);

        match self.target.to_lowercase().as_str() {
            "stdout" => {
                builder.target(Target::Stdout);
            }
            "stderr" => {
                builder.target(Target::Stderr);
            }
            _ => {
                return Err(format!("Unknown logging target: {}", self.target));
            }
        }

        let include_module_path = self.include_module_path;
        let timestamps = self.timestamps;

        builder.format(move |buf, record| {
            let mut output = String::new();

            if timestamps {
                output.push_str(&format!("[{}] ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")));
            }

            output.push_str(&format!("[{}] ", record.level()));

            if include_module_path {
                if let Some(module) = record.module_path() {
                    output.push_str(&format!("[{}] ", module));
                }
            }

            output.push_str(&format!("{}", record.args()));

            writeln!(buf, "{}", output)
        });

        builder.try_init()
            .map_err(|e| format!("Failed to initialize logger: {}", e))?;

        debug!("Logging initialized with filter: {}", filter_string);
        Ok(())
    }
}

/// Initialize logging from a configuration, optionally forcing debug level
pub fn initialize_logging(config: &LoggingConfig, debug_mode: bool) -> Result<(), String> {
    let mut config = config.clone();
    if debug_mode {
        config.level = "debug".to_string();
    }
    config.initialize_logger()?;
    if debug_mode {
        info!("Debug mode enabled via command line");
    }
    Ok(())
}
