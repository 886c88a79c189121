//! Reservation engine
//!
//! Everything that decides who sits where and when: the weekly schedule
//! calendar, the table inventory, the availability resolver over a single
//! service day, the booking/lifecycle manager and the reporting
//! aggregations. The engine works on civil dates and times in the venue's
//! own clock; nothing here converts timezones.

pub mod availability;
pub mod calendar;
pub mod inventory;
pub mod manager;
pub mod setup;
pub mod stats;
pub mod types;

pub use availability::AvailabilityResolver;
pub use calendar::ScheduleCalendar;
pub use inventory::TableInventory;
pub use manager::ReservationManager;
pub use types::{
    AvailabilityReply, BookingConfirmation, BookingIntent, BookingOutcome, BookingRequest,
    DenialReason, IntentReply,
};
