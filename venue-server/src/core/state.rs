//! Shared server state
//!
//! One [`ServerState`] is built at startup and cloned into every handler.
//! Managers are cheap to construct; the state only keeps the shared pieces
//! alive: the database handle, the config and the per-venue booking locks.

use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use crate::core::Config;
use crate::reservations::ReservationManager;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    /// One advisory lock per venue; every booking for a venue serializes
    /// its check-and-insert on this
    booking_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self {
            config: Arc::new(config),
            db,
            booking_locks: Arc::new(DashMap::new()),
        }
    }

    fn booking_lock(&self, venue: &str) -> Arc<Mutex<()>> {
        self.booking_locks
            .entry(venue.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// A manager bound to one venue, sharing that venue's booking lock
    pub fn manager_for(&self, venue: &str) -> ReservationManager {
        ReservationManager::new(self.db.clone(), venue, self.booking_lock(venue))
    }
}
