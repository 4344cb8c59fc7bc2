//! Long-lived page sessions.
//!
//! A page owns its state, its views and one [`crate::Operation`] per remote
//! dataset. Input reaches it only as an [`Action`] passed to `dispatch`.

mod locations;
mod panel;

pub use locations::{Action, LocationsPage, LocationsState, LAST_UPDATED_FORMAT};
pub use panel::{ListSection, SafetyPanel};

use chrono::{DateTime, Utc};
use safemap_client::Clock;

/// Wall-clock instant of the injected clock, for stamping completed loads.
pub(crate) fn clock_now<C: Clock>(clock: &C) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(clock.now_millis()).unwrap_or_else(Utc::now)
}
