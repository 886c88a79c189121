/// Server configuration — all tunables for a venue node
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/venue | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | Runtime environment |
/// | DEFAULT_VENUE | default | Venue id served by background sweeps |
/// | NOSHOW_GRACE_MINUTES | 30 | Grace before a late party is swept |
/// | NOSHOW_SWEEP_INTERVAL_SECS | 300 | Period of the no-show sweep task |
/// | REMINDER_HOURS_BEFORE | 4 | Lead time for reminder discovery |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/venue HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Venue id the periodic sweeps run against
    pub default_venue: String,
    /// Minutes past reservation time before auto no-show marking
    pub noshow_grace_minutes: i64,
    /// Seconds between no-show sweep runs
    pub noshow_sweep_interval_secs: u64,
    /// Hours before a reservation that a reminder becomes due
    pub reminder_hours_before: i64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Falls back to defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/venue".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            default_venue: std::env::var("DEFAULT_VENUE").unwrap_or_else(|_| "default".into()),
            noshow_grace_minutes: std::env::var("NOSHOW_GRACE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            noshow_sweep_interval_secs: std::env::var("NOSHOW_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            reminder_hours_before: std::env::var("REMINDER_HOURS_BEFORE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
        }
    }

    /// Override work dir and port, keeping everything else from the environment
    ///
    /// Mostly useful in tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development deployment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Directory holding the embedded database
    pub fn database_dir(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(&self.work_dir).join("database")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
