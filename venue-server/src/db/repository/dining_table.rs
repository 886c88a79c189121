//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active tables for a venue, zone/name ordered for listings
    pub async fn find_active(&self, venue: &str) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE venue = $venue AND active = true \
                 ORDER BY zone, name",
            )
            .bind(("venue", venue.to_string()))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Every table including deactivated ones, for joining reservation
    /// history against tables that no longer take bookings
    pub async fn find_all(&self, venue: &str) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE venue = $venue ORDER BY zone, name")
            .bind(("venue", venue.to_string()))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by name within a venue
    pub async fn find_by_name(&self, venue: &str, name: &str) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE venue = $venue AND name = $name LIMIT 1")
            .bind(("venue", venue.to_string()))
            .bind(("name", name.to_string()))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new table
    pub async fn create(&self, venue: &str, data: DiningTableCreate) -> RepoResult<DiningTable> {
        // Duplicate name check within the venue
        if self.find_by_name(venue, &data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                data.name
            )));
        }

        let min_seats = data.min_seats.unwrap_or(2);
        let max_seats = data.max_seats.unwrap_or(4);
        if min_seats > max_seats {
            return Err(RepoError::Validation(format!(
                "min_seats {} exceeds max_seats {}",
                min_seats, max_seats
            )));
        }

        let table = DiningTable {
            id: None,
            venue: venue.to_string(),
            name: data.name,
            zone: data.zone.unwrap_or_else(|| "interior".to_string()),
            min_seats,
            max_seats,
            priority: data.priority.unwrap_or(5),
            combinable: data.combinable.unwrap_or(false),
            combine_with: None,
            active: true,
            notes: data.notes,
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table".to_string()))
    }

    /// Update a table
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        // Duplicate name check when renaming
        if let Some(new_name) = &data.name
            && *new_name != existing.name
            && self.find_by_name(&existing.venue, new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                new_name
            )));
        }

        let min_seats = data.min_seats.unwrap_or(existing.min_seats);
        let max_seats = data.max_seats.unwrap_or(existing.max_seats);
        if min_seats > max_seats {
            return Err(RepoError::Validation(format!(
                "min_seats {} exceeds max_seats {}",
                min_seats, max_seats
            )));
        }

        // Manual UPDATE statement keeps the record id untouched
        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, zone = $zone, min_seats = $min_seats, \
                 max_seats = $max_seats, priority = $priority, combinable = $combinable, \
                 notes = $notes, active = $active",
            )
            .bind(("thing", thing))
            .bind(("name", data.name.unwrap_or(existing.name)))
            .bind(("zone", data.zone.unwrap_or(existing.zone)))
            .bind(("min_seats", min_seats))
            .bind(("max_seats", max_seats))
            .bind(("priority", data.priority.unwrap_or(existing.priority)))
            .bind(("combinable", data.combinable.unwrap_or(existing.combinable)))
            .bind(("notes", data.notes.or(existing.notes)))
            .bind(("active", data.active.unwrap_or(existing.active)))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Deactivate a table (soft delete; reservation history stays intact)
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
