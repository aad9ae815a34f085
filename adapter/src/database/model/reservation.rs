use super::{parse_stored, user::JoinedUser};
use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ReservationId, UserId},
    loan::PurposeDetails,
    reservation::Reservation,
};
use shared::error::AppError;
use sqlx::types::Json;

#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub user_role: Option<String>,
    pub user_dni: Option<String>,
    pub user_email: Option<String>,
    pub purpose: String,
    pub purpose_details: Option<Json<PurposeDetails>>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            user_id,
            user_name,
            user_role,
            user_dni,
            user_email,
            purpose,
            purpose_details,
            start_time,
            end_time,
            status,
        } = value;
        let user = JoinedUser {
            user_id,
            name: user_name,
            role: user_role,
            dni: user_dni,
            email: user_email,
        }
        .into_summary()?;
        Ok(Reservation {
            id: reservation_id,
            user_id,
            user,
            purpose: parse_stored(&purpose)?,
            purpose_details: purpose_details.map(|d| d.0).unwrap_or_default(),
            start_time,
            end_time,
            status: parse_stored(&status)?,
        })
    }
}
