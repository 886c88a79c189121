//! Service Period Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::ServicePeriod;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "service_period";

#[derive(Clone)]
pub struct ServicePeriodRepository {
    base: BaseRepository,
}

impl ServicePeriodRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All active periods for a venue, week-ordered
    pub async fn find_active(&self, venue: &str) -> RepoResult<Vec<ServicePeriod>> {
        let periods: Vec<ServicePeriod> = self
            .base
            .db()
            .query(
                "SELECT * FROM service_period WHERE venue = $venue AND active = true \
                 ORDER BY day_of_week, start_time",
            )
            .bind(("venue", venue.to_string()))
            .await?
            .take(0)?;
        Ok(periods)
    }

    /// Create a new period; the caller has already parsed and validated times
    pub async fn create(&self, period: ServicePeriod) -> RepoResult<ServicePeriod> {
        let created: Option<ServicePeriod> = self.base.db().create(TABLE).content(period).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create service period".to_string()))
    }

    /// Deactivate a period
    pub async fn deactivate(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET active = false")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
