use super::*;
use crate::db::DbService;
use crate::db::models::{ClosedDay, DiningTableCreate, ServicePeriod};

// 2025-06-06 is a Friday (weekday 4 in the 0 = Monday scheme)
fn friday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 6).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

async fn fixture() -> (DbService, ReservationManager) {
    let db = DbService::new_memory().await.unwrap();
    let manager = ReservationManager::new(db.db.clone(), "test", Arc::new(Mutex::new(())));
    (db, manager)
}

async fn add_table(db: &DbService, name: &str, zone: &str, min: i32, max: i32, priority: i32) {
    DiningTableRepository::new(db.db.clone())
        .create(
            "test",
            DiningTableCreate {
                name: name.to_string(),
                zone: Some(zone.to_string()),
                min_seats: Some(min),
                max_seats: Some(max),
                priority: Some(priority),
                combinable: None,
                notes: None,
            },
        )
        .await
        .unwrap();
}

/// Friday dinner 18:00-22:00, last seating 21:00, 90-minute slots on a
/// 30-minute grid
async fn add_dinner(db: &DbService) {
    ServicePeriodRepository::new(db.db.clone())
        .create(ServicePeriod {
            id: None,
            venue: "test".to_string(),
            name: "Dinner".to_string(),
            day_of_week: 4,
            start_time: t(18, 0),
            end_time: t(22, 0),
            last_seating: Some(t(21, 0)),
            slot_duration_min: 90,
            slot_interval_min: 30,
            max_covers: None,
            active: true,
        })
        .await
        .unwrap();
}

async fn close_friday(db: &DbService) {
    ClosedDayRepository::new(db.db.clone())
        .create(ClosedDay {
            id: None,
            venue: "test".to_string(),
            date: Some(friday()),
            recurring_weekday: None,
            reason: "Private event".to_string(),
        })
        .await
        .unwrap();
}

fn request(time: NaiveTime, party_size: i32) -> BookingRequest {
    BookingRequest {
        date: friday(),
        time,
        party_size,
        guest_name: "Maria Silva".to_string(),
        guest_phone: Some("+351910000000".to_string()),
        guest_email: None,
        language: "pt".to_string(),
        zone_preference: None,
        notes: None,
        special_requests: None,
        source: "whatsapp".to_string(),
        guest_id: None,
    }
}

async fn book(manager: &ReservationManager, time: NaiveTime, party_size: i32) -> BookingOutcome {
    manager.create_reservation(request(time, party_size)).await.unwrap()
}

mod test_booking;
