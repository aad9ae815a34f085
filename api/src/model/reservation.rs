use super::{loan::UserRef, user::UserSummaryResponse};
use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ReservationId, UserId},
    loan::{Purpose, PurposeDetails},
    reservation::{event::CreateReservation, Reservation, ReservationStatus},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::VariantNames;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub user: UserSummaryResponse,
    pub user_id: UserId,
    pub purpose: Purpose,
    pub purpose_details: PurposeDetails,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ReservationStatus,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            id,
            user_id,
            user,
            purpose,
            purpose_details,
            start_time,
            end_time,
            status,
        } = value;
        Self {
            id,
            user: user.into(),
            user_id,
            purpose,
            purpose_details,
            start_time,
            end_time,
            status,
        }
    }
}

#[derive(Debug, Deserialize, VariantNames)]
#[serde(tag = "action", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ReservationAction {
    Add(CreateReservationRequest),
    UpdateStatus(UpdateReservationStatusRequest),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub purpose: Purpose,
    #[serde(default)]
    pub purpose_details: Option<PurposeDetails>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<ReservationStatus>,
}

impl CreateReservationRequest {
    /// The booker, taken from `user.id` or `userId`.
    pub fn booker_id(&self) -> AppResult<UserId> {
        self.user
            .as_ref()
            .map(|u| u.id)
            .or(self.user_id)
            .ok_or_else(|| AppError::BadRequest("Se requiere el ID de usuario".into()))
    }

    pub fn into_event(self) -> AppResult<CreateReservation> {
        let user_id = self.booker_id()?;
        let event = CreateReservation {
            user_id,
            purpose: self.purpose,
            purpose_details: self.purpose_details.unwrap_or_default(),
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status.unwrap_or_default(),
        };
        event.ensure_valid_period()?;
        Ok(event)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatusRequest {
    pub reservation_id: ReservationId,
    pub status: ReservationStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReservationQuery {
    pub reservation_id: ReservationId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: serde_json::Value) -> CreateReservationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn booker_comes_from_user_or_user_id() {
        let id = UserId::new();
        let nested = request(serde_json::json!({
            "user": { "id": id },
            "purpose": "institucional",
            "startTime": "2025-05-05T13:00:00Z",
            "endTime": "2025-05-05T14:00:00Z"
        }));
        assert_eq!(nested.booker_id().unwrap(), id);

        let flat = request(serde_json::json!({
            "userId": id,
            "purpose": "institucional",
            "startTime": "2025-05-05T13:00:00Z",
            "endTime": "2025-05-05T14:00:00Z"
        }));
        let event = flat.into_event().unwrap();
        assert_eq!(event.user_id, id);
        assert_eq!(event.status, ReservationStatus::Confirmada);
    }

    #[test]
    fn missing_booker_or_inverted_period_is_a_bad_request() {
        let anonymous = request(serde_json::json!({
            "purpose": "aprendizaje",
            "startTime": "2025-05-05T13:00:00Z",
            "endTime": "2025-05-05T14:00:00Z"
        }));
        assert!(matches!(anonymous.into_event(), Err(AppError::BadRequest(_))));

        let inverted = request(serde_json::json!({
            "userId": UserId::new(),
            "purpose": "aprendizaje",
            "startTime": "2025-05-05T15:00:00Z",
            "endTime": "2025-05-05T14:00:00Z"
        }));
        assert!(matches!(inverted.into_event(), Err(AppError::BadRequest(_))));
    }
}
