//! Closed Day Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::ClosedDay;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "closed_day";

#[derive(Clone)]
pub struct ClosedDayRepository {
    base: BaseRepository,
}

impl ClosedDayRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All closures for a venue; the calendar decides which match a date
    pub async fn find_all(&self, venue: &str) -> RepoResult<Vec<ClosedDay>> {
        let days: Vec<ClosedDay> = self
            .base
            .db()
            .query("SELECT * FROM closed_day WHERE venue = $venue")
            .bind(("venue", venue.to_string()))
            .await?
            .take(0)?;
        Ok(days)
    }

    /// Record a closure
    pub async fn create(&self, day: ClosedDay) -> RepoResult<ClosedDay> {
        if day.date.is_none() && day.recurring_weekday.is_none() {
            return Err(RepoError::Validation(
                "A closed day needs a date or a recurring weekday".to_string(),
            ));
        }
        let created: Option<ClosedDay> = self.base.db().create(TABLE).content(day).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create closed day".to_string()))
    }
}
