//! ReservationManager - Booking protocol and lifecycle transitions
//!
//! The only write path into the reservation ledger. Everything the engine
//! decides runs over a per-date snapshot loaded here; the database stays a
//! plain row store.
//!
//! # Booking Flow
//!
//! ```text
//! create_reservation(request)
//!     ├─ 1. Acquire the venue booking lock
//!     ├─ 2. Load the (venue, date) snapshot
//!     ├─ 3. Availability check (closed / hours / last seating / tables)
//!     ├─ 4. Pick the table (zone preference, then priority order)
//!     ├─ 5. Compute end_time from the covering period
//!     ├─ 6. Insert with status = confirmed
//!     └─ 7. Release the lock, return the confirmation
//! ```
//!
//! The lock is advisory and venue-scoped: two concurrent bookings for the
//! same venue serialize between check and insert, which is what keeps the
//! no-overlap invariant without storage-level constraints.

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::db::models::{
    DiningTable, Reservation, ReservationStatus, ReservationUpdate,
};
use crate::db::repository::{
    ClosedDayRepository, DiningTableRepository, RepoError, RepoResult, ReservationRepository,
    ServicePeriodRepository,
};

use super::availability::{ALTERNATIVE_LIMIT, AvailabilityResolver};
use super::calendar::ScheduleCalendar;
use super::inventory::TableInventory;
use super::stats::{self, DayOverview, StatsReport, TableTimeline};
use super::types::{
    AvailabilityReply, BookingConfirmation, BookingIntent, BookingOutcome, BookingRequest,
    DenialReason, IntentReply, SlotAvailability,
};

/// Fallback dining duration when no period covers the requested time
const DEFAULT_DURATION_MIN: i64 = 90;

pub struct ReservationManager {
    venue: String,
    tables: DiningTableRepository,
    periods: ServicePeriodRepository,
    closed_days: ClosedDayRepository,
    reservations: ReservationRepository,
    /// Serializes check-and-insert for this venue
    booking_lock: Arc<Mutex<()>>,
}

impl ReservationManager {
    pub fn new(db: Surreal<Db>, venue: impl Into<String>, booking_lock: Arc<Mutex<()>>) -> Self {
        Self {
            venue: venue.into(),
            tables: DiningTableRepository::new(db.clone()),
            periods: ServicePeriodRepository::new(db.clone()),
            closed_days: ClosedDayRepository::new(db.clone()),
            reservations: ReservationRepository::new(db),
            booking_lock,
        }
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    /// Load the full decision snapshot for one service day
    pub async fn resolver_for(&self, date: NaiveDate) -> RepoResult<AvailabilityResolver> {
        let periods = self.periods.find_active(&self.venue).await?;
        let closed_days = self.closed_days.find_all(&self.venue).await?;
        let tables = self.tables.find_active(&self.venue).await?;
        let ledger = self.reservations.find_by_date(&self.venue, date).await?;
        Ok(AvailabilityResolver::new(
            date,
            ScheduleCalendar::new(periods, closed_days),
            TableInventory::new(tables),
            ledger,
        ))
    }

    pub async fn available_slots(
        &self,
        date: NaiveDate,
        party_size: i32,
    ) -> RepoResult<Vec<SlotAvailability>> {
        Ok(self.resolver_for(date).await?.available_slots(party_size))
    }

    pub async fn check_availability(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        party_size: i32,
    ) -> RepoResult<AvailabilityReply> {
        Ok(self.resolver_for(date).await?.check(time, party_size))
    }

    /// Availability check at the intent boundary
    ///
    /// A partial intent answers with the fields still missing, in asking
    /// order, so the calling layer can collect them from the guest; a
    /// complete one runs the normal check.
    pub async fn check_intent(&self, intent: BookingIntent) -> RepoResult<IntentReply> {
        match intent.require() {
            Err(missing) => Ok(IntentReply::NeedsFields(missing)),
            Ok((date, time, party_size)) => Ok(IntentReply::Checked(
                self.check_availability(date, time, party_size).await?,
            )),
        }
    }

    /// The booking protocol: check, assign, persist, all under the venue
    /// lock. Business rejections come back as a denied outcome, never as
    /// an error.
    pub async fn create_reservation(&self, request: BookingRequest) -> RepoResult<BookingOutcome> {
        let _guard = self.booking_lock.lock().await;

        let resolver = self.resolver_for(request.date).await?;
        let reply = resolver.check(request.time, request.party_size);
        if !reply.available {
            let reason = reply.reason.unwrap_or(DenialReason::FullyBooked);
            return Ok(BookingOutcome::denied(reason, reply.alternatives));
        }

        let duration = resolver
            .calendar()
            .find_period_covering(request.date, request.time)
            .map(|p| p.slot_duration_min)
            .unwrap_or(DEFAULT_DURATION_MIN);

        let free = resolver.free_tables(request.time, duration, request.party_size);
        let chosen: Option<&DiningTable> = match &request.zone_preference {
            Some(zone) => free
                .iter()
                .find(|t| &t.zone == zone)
                .or_else(|| free.first())
                .copied(),
            None => free.first().copied(),
        };
        let Some(table) = chosen else {
            // check() said yes moments ago on this same snapshot; treat a
            // mismatch as a full house rather than crash the booking path
            return Ok(BookingOutcome::denied(
                DenialReason::FullyBooked,
                resolver.alternatives(request.party_size, request.time, ALTERNATIVE_LIMIT),
            ));
        };

        let now = Utc::now();
        let row = Reservation {
            id: None,
            venue: self.venue.clone(),
            date: request.date,
            time: request.time,
            end_time: Some(request.time + Duration::minutes(duration)),
            party_size: request.party_size,
            guest_name: request.guest_name.clone(),
            guest_phone: request.guest_phone,
            guest_email: request.guest_email,
            language: request.language,
            guest_id: request.guest_id,
            table: table.id.clone(),
            zone_preference: request.zone_preference,
            status: ReservationStatus::Confirmed,
            source: request.source,
            notes: request.notes,
            special_requests: request.special_requests,
            created_at: now,
            confirmed_at: Some(now),
            reminder_sent_at: None,
            seated_at: None,
            completed_at: None,
            cancelled_at: None,
            noshow_marked_at: None,
        };

        let table_name = table.name.clone();
        let table_zone = table.zone.clone();
        let created = match self.reservations.create(row).await {
            Ok(created) => created,
            Err(err) => {
                // The slot is not provably ours anymore; deny instead of
                // leaking an infrastructure error to the guest
                warn!(venue = %self.venue, error = %err, "reservation insert failed");
                return Ok(BookingOutcome::denied(
                    DenialReason::FullyBooked,
                    resolver.alternatives(request.party_size, request.time, ALTERNATIVE_LIMIT),
                ));
            }
        };

        let id = created
            .id
            .as_ref()
            .map(|r| r.to_string())
            .unwrap_or_default();
        info!(
            venue = %self.venue,
            reservation = %id,
            date = %request.date,
            time = %request.time,
            party_size = request.party_size,
            table = %table_name,
            "reservation created"
        );

        Ok(BookingOutcome::booked(BookingConfirmation {
            id,
            date: request.date,
            time: request.time,
            party_size: request.party_size,
            guest_name: request.guest_name,
            table: table_name,
            zone: table_zone,
            status: ReservationStatus::Confirmed,
        }))
    }

    /// Walk-in at the door: book the current minute and seat immediately
    pub async fn create_walkin(
        &self,
        party_size: i32,
        guest_name: Option<String>,
    ) -> RepoResult<BookingOutcome> {
        self.create_walkin_at(Local::now().naive_local(), party_size, guest_name)
            .await
    }

    pub(crate) async fn create_walkin_at(
        &self,
        now: NaiveDateTime,
        party_size: i32,
        guest_name: Option<String>,
    ) -> RepoResult<BookingOutcome> {
        let time = now
            .time()
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now.time());

        let mut outcome = self
            .create_reservation(BookingRequest {
                date: now.date(),
                time,
                party_size,
                guest_name: guest_name.unwrap_or_else(|| "Walk-in".to_string()),
                guest_phone: None,
                guest_email: None,
                language: "en".to_string(),
                zone_preference: None,
                notes: None,
                special_requests: None,
                source: "walkin".to_string(),
                guest_id: None,
            })
            .await?;

        if let Some(confirmation) = outcome.reservation.as_mut() {
            self.seat_guest(&confirmation.id).await?;
            confirmation.status = ReservationStatus::Seated;
        }
        Ok(outcome)
    }

    /// Drive one lifecycle transition; refused edges and unknown ids are
    /// reported as false, not errors
    pub async fn transition(&self, id: &str, next: ReservationStatus) -> RepoResult<bool> {
        let row = match self.reservations.find_by_id(id).await {
            Ok(row) => row,
            // A malformed id is just an unknown reservation here
            Err(RepoError::Validation(_)) => None,
            Err(err) => return Err(err),
        };
        let Some(row) = row else {
            return Ok(false);
        };
        if row.venue != self.venue || !row.status.allows(next) {
            return Ok(false);
        }
        self.reservations.update_status(id, next, Utc::now()).await?;
        info!(
            venue = %self.venue,
            reservation = %id,
            from = row.status.as_str(),
            to = next.as_str(),
            "reservation transition"
        );
        Ok(true)
    }

    pub async fn seat_guest(&self, id: &str) -> RepoResult<bool> {
        self.transition(id, ReservationStatus::Seated).await
    }

    pub async fn complete_reservation(&self, id: &str) -> RepoResult<bool> {
        self.transition(id, ReservationStatus::Completed).await
    }

    pub async fn cancel_reservation(&self, id: &str) -> RepoResult<bool> {
        self.transition(id, ReservationStatus::Cancelled).await
    }

    pub async fn mark_noshow(&self, id: &str) -> RepoResult<bool> {
        self.transition(id, ReservationStatus::Noshow).await
    }

    pub async fn get_reservation(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let row = self.reservations.find_by_id(id).await?;
        Ok(row.filter(|r| r.venue == self.venue))
    }

    pub async fn list_reservations(
        &self,
        date: Option<NaiveDate>,
        status: Option<ReservationStatus>,
        limit: usize,
    ) -> RepoResult<Vec<Reservation>> {
        self.reservations.list(&self.venue, date, status, limit).await
    }

    /// Guest-facing field edits; scheduling fields never change here
    pub async fn update_reservation(
        &self,
        id: &str,
        patch: ReservationUpdate,
    ) -> RepoResult<Option<Reservation>> {
        if self.get_reservation(id).await?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.reservations.update_guest_fields(id, patch).await?))
    }

    /// Sweep today's overdue confirmed rows into noshow. Idempotent: a
    /// second run finds nothing because noshow rows are no longer
    /// confirmed. Returns the marked ids.
    pub async fn auto_mark_noshows(&self, grace_minutes: i64) -> RepoResult<Vec<String>> {
        self.auto_mark_noshows_at(Local::now().naive_local(), grace_minutes)
            .await
    }

    pub(crate) async fn auto_mark_noshows_at(
        &self,
        now: NaiveDateTime,
        grace_minutes: i64,
    ) -> RepoResult<Vec<String>> {
        let cutoff = now - Duration::minutes(grace_minutes.max(0));
        let today = self.reservations.find_by_date(&self.venue, now.date()).await?;

        let mut marked = Vec::new();
        for row in today {
            if row.status != ReservationStatus::Confirmed {
                continue;
            }
            if row.date.and_time(row.time) > cutoff {
                continue;
            }
            let Some(id) = row.id.as_ref().map(|r| r.to_string()) else {
                continue;
            };
            self.reservations
                .update_status(&id, ReservationStatus::Noshow, Utc::now())
                .await?;
            marked.push(id);
        }

        if !marked.is_empty() {
            info!(venue = %self.venue, count = marked.len(), "auto no-show sweep marked reservations");
        }
        Ok(marked)
    }

    /// Confirmed rows on the date `hours_before` hours from now with no
    /// reminder stamped yet. Delivery and marking stay with the caller.
    pub async fn get_reservations_needing_reminder(
        &self,
        hours_before: i64,
    ) -> RepoResult<Vec<Reservation>> {
        self.reservations_needing_reminder_at(Local::now().naive_local(), hours_before)
            .await
    }

    pub(crate) async fn reservations_needing_reminder_at(
        &self,
        now: NaiveDateTime,
        hours_before: i64,
    ) -> RepoResult<Vec<Reservation>> {
        let target = now + Duration::hours(hours_before.max(0));
        self.reservations
            .find_needing_reminder(&self.venue, target.date())
            .await
    }

    /// Stamp a reservation as reminded (the caller delivered it)
    pub async fn mark_reminder_sent(&self, id: &str) -> RepoResult<bool> {
        if self.get_reservation(id).await?.is_none() {
            return Ok(false);
        }
        self.reservations.set_reminder_sent(id, Utc::now()).await?;
        Ok(true)
    }

    pub async fn day_overview(&self, date: NaiveDate) -> RepoResult<DayOverview> {
        let resolver = self.resolver_for(date).await?;
        Ok(stats::compute_day_overview(
            date,
            resolver.calendar().is_closed(date),
            resolver.inventory().all(),
            resolver.ledger(),
        ))
    }

    pub async fn table_timeline(&self, date: NaiveDate) -> RepoResult<Vec<TableTimeline>> {
        let resolver = self.resolver_for(date).await?;
        Ok(stats::compute_table_timeline(
            resolver.inventory().all(),
            resolver.ledger(),
        ))
    }

    pub async fn stats(&self, from: NaiveDate, to: NaiveDate) -> RepoResult<StatsReport> {
        let rows = self.reservations.find_range(&self.venue, from, to).await?;
        Ok(stats::compute_stats(from, to, &rows))
    }
}

#[cfg(test)]
mod tests;
