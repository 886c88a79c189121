//! Database Models
//!
//! Immutable value records for the persisted entities. Repositories return
//! these; the engine never holds a live database session as ambient state.

pub mod closed_day;
pub mod dining_table;
pub mod reservation;
pub mod serde_helpers;
pub mod service_period;

pub use closed_day::{ClosedDay, ClosedDayCreate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use reservation::{Reservation, ReservationStatus, ReservationUpdate};
pub use service_period::{ServicePeriod, ServicePeriodCreate};
