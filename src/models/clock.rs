use crate::timezone::LocalTime;
use chrono::{DateTime, Utc};
use rocket::serde::Serialize;
use schemars::JsonSchema;

#[derive(Serialize, Debug, JsonSchema)]
pub struct ClockResponse {
    pub timezone: String,
    pub instant: DateTime<Utc>,
    pub local: LocalTime,
    /// UTC instant of local midnight for the day `instant` falls on.
    pub start_of_day: DateTime<Utc>,
    pub utc_offset_hours: i32,
    pub formatted: String,
}
