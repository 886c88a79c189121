//! Venue Server - reservation scheduling engine for restaurants
//!
//! # Overview
//!
//! A single-node HTTP server that manages table reservations for one or
//! more venues: weekly service periods, closure rules, a prioritized table
//! inventory, conflict-checked bookings with a five-state lifecycle, and
//! the reporting views a host stand needs.
//!
//! # Module structure
//!
//! ```text
//! venue-server/src/
//! ├── core/          # Configuration, state, server, errors
//! ├── utils/         # AppError/AppResponse, logging, time helpers
//! ├── db/            # Embedded SurrealDB storage and repositories
//! ├── reservations/  # Scheduling engine and booking manager
//! └── api/           # HTTP routes and handlers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod reservations;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use reservations::ReservationManager;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load the environment, create the working directory and start logging
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/venue".to_string());
    std::fs::create_dir_all(&work_dir)?;

    let log_dir = std::path::Path::new(&work_dir).join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.to_str());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
 _    __
| |  / /__  ____  __  _____
| | / / _ \/ __ \/ / / / _ \
| |/ /  __/ / / / /_/ /  __/
|___/\___/_/ /_/\__,_/\___/
    "#
    );
}
