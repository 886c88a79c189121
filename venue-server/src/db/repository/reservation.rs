//! Reservation Repository
//!
//! The durable ledger behind conflict detection. Rows are inserted and
//! status-updated, never deleted; terminal statuses keep the history for
//! reporting.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Reservation, ReservationStatus, ReservationUpdate};
use chrono::{DateTime, NaiveDate, Utc};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let reservation: Option<Reservation> = self.base.db().select(thing).await?;
        Ok(reservation)
    }

    /// Every reservation on a service day, any status
    pub async fn find_by_date(&self, venue: &str, date: NaiveDate) -> RepoResult<Vec<Reservation>> {
        let rows: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE venue = $venue AND date = $date ORDER BY time",
            )
            .bind(("venue", venue.to_string()))
            .bind(("date", date))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Reservations in a date range (inclusive), for reporting
    pub async fn find_range(
        &self,
        venue: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepoResult<Vec<Reservation>> {
        let rows: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE venue = $venue \
                 AND date >= $from AND date <= $to ORDER BY date, time",
            )
            .bind(("venue", venue.to_string()))
            .bind(("from", from))
            .bind(("to", to))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Listing with optional filters (dashboard view)
    pub async fn list(
        &self,
        venue: &str,
        date: Option<NaiveDate>,
        status: Option<ReservationStatus>,
        limit: usize,
    ) -> RepoResult<Vec<Reservation>> {
        let mut sql =
            String::from("SELECT * FROM reservation WHERE venue = $venue");
        if date.is_some() {
            sql.push_str(" AND date = $date");
        }
        if status.is_some() {
            sql.push_str(" AND status = $status");
        }
        sql.push_str(" ORDER BY date, time LIMIT $limit");

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("venue", venue.to_string()))
            .bind(("limit", limit as i64));
        if let Some(date) = date {
            query = query.bind(("date", date));
        }
        if let Some(status) = status {
            query = query.bind(("status", status));
        }

        let rows: Vec<Reservation> = query.await?.take(0)?;
        Ok(rows)
    }

    /// Confirmed reservations on a date with no reminder sent yet
    pub async fn find_needing_reminder(
        &self,
        venue: &str,
        date: NaiveDate,
    ) -> RepoResult<Vec<Reservation>> {
        let rows: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE venue = $venue AND date = $date \
                 AND status = $status AND reminder_sent_at = NONE ORDER BY time",
            )
            .bind(("venue", venue.to_string()))
            .bind(("date", date))
            .bind(("status", ReservationStatus::Confirmed))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Insert a new reservation
    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Set a new status and stamp the matching transition timestamp
    pub async fn update_status(
        &self,
        id: &str,
        next: ReservationStatus,
        at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let ts_field = match next {
            ReservationStatus::Confirmed => "confirmed_at",
            ReservationStatus::Seated => "seated_at",
            ReservationStatus::Completed => "completed_at",
            ReservationStatus::Cancelled => "cancelled_at",
            ReservationStatus::Noshow => "noshow_marked_at",
        };
        let sql = format!("UPDATE $thing SET status = $status, {ts_field} = $at");
        self.base
            .db()
            .query(sql)
            .bind(("thing", thing))
            .bind(("status", next))
            .bind(("at", at))
            .await?;
        Ok(())
    }

    /// Stamp reminder_sent_at (caller has delivered the reminder)
    pub async fn set_reminder_sent(&self, id: &str, at: DateTime<Utc>) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET reminder_sent_at = $at")
            .bind(("thing", thing))
            .bind(("at", at))
            .await?;
        Ok(())
    }

    /// Patch guest-facing fields only
    pub async fn update_guest_fields(
        &self,
        id: &str,
        patch: ReservationUpdate,
    ) -> RepoResult<Reservation> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))?;

        self.base
            .db()
            .query(
                "UPDATE $thing SET guest_name = $guest_name, guest_phone = $guest_phone, \
                 notes = $notes, special_requests = $special_requests",
            )
            .bind(("thing", thing))
            .bind(("guest_name", patch.guest_name.unwrap_or(existing.guest_name)))
            .bind(("guest_phone", patch.guest_phone.or(existing.guest_phone)))
            .bind(("notes", patch.notes.or(existing.notes)))
            .bind((
                "special_requests",
                patch.special_requests.or(existing.special_requests),
            ))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }
}
