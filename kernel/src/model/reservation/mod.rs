use crate::model::{
    id::{ReservationId, UserId},
    loan::{Purpose, PurposeDetails},
    user::UserSummary,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub mod event;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum ReservationStatus {
    #[default]
    Confirmada,
    Realizada,
    #[strum(serialize = "No asistió")]
    #[serde(rename = "No asistió")]
    NoAsistio,
    Cancelada,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub user: UserSummary,
    pub purpose: Purpose,
    pub purpose_details: PurposeDetails,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ReservationStatus,
}

/// Listing window: reservations starting this many days ago or later.
pub const RECENT_WINDOW_DAYS: i64 = 30;
/// Upper bound on rows returned by a listing.
pub const LIST_LIMIT: i64 = 500;

pub fn recent_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(RECENT_WINDOW_DAYS)
}
