//! # API Configuration Module
//!
//! Loads configuration for the MedQueue API server from environment
//! variables, with defaults where sensible.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `SCHEDULER_ROLLOVER_DAYS`: Candidate days tried before a department counts as fully booked (default: 7)
//! - `SCHEDULER_QUEUE_RETRIES`: Placement attempts when a queue number is lost to a concurrent booking (default: 16)

use eyre::{Result, WrapErr};
use medqueue_core::scheduler::SchedulerPolicy;
use std::env;
use tracing::Level;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Rollover and retry limits handed to the scheduler
    pub scheduler: SchedulerPolicy,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - A scheduler limit is set but is not a positive integer
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Scheduler settings
        let defaults = SchedulerPolicy::default();
        let scheduler = SchedulerPolicy {
            rollover_days: positive_env("SCHEDULER_ROLLOVER_DAYS", defaults.rollover_days)?,
            queue_retries: positive_env("SCHEDULER_QUEUE_RETRIES", defaults.queue_retries)?,
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            request_timeout,
            scheduler,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn parse_log_level(raw: &str) -> Level {
    match raw.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn positive_env(name: &str, default: u32) -> Result<u32> {
    match env::var(name) {
        Ok(raw) => parse_positive(&raw).wrap_err_with(|| format!("Invalid {} value", name)),
        Err(_) => Ok(default),
    }
}

pub fn parse_positive(raw: &str) -> Result<u32> {
    let value: u32 = raw.trim().parse()?;
    if value == 0 {
        eyre::bail!("must be at least 1");
    }
    Ok(value)
}
