use crate::model::{
    id::{ReservationId, UserId},
    loan::{Purpose, PurposeDetails},
    reservation::ReservationStatus,
};
use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub user_id: UserId,
    pub purpose: Purpose,
    pub purpose_details: PurposeDetails,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ReservationStatus,
}

impl CreateReservation {
    pub fn ensure_valid_period(&self) -> AppResult<()> {
        if self.end_time <= self.start_time {
            return Err(AppError::BadRequest(
                "La hora de fin debe ser posterior a la hora de inicio".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct UpdateReservationStatus {
    pub reservation_id: ReservationId,
    pub status: ReservationStatus,
}

#[derive(Debug)]
pub struct DeleteReservation {
    pub reservation_id: ReservationId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reservation(start: DateTime<Utc>, end: DateTime<Utc>) -> CreateReservation {
        CreateReservation {
            user_id: UserId::new(),
            purpose: Purpose::Aprendizaje,
            purpose_details: PurposeDetails::default(),
            start_time: start,
            end_time: end,
            status: ReservationStatus::default(),
        }
    }

    #[test]
    fn end_must_follow_start() {
        let start = Utc::now();
        assert!(reservation(start, start + Duration::minutes(45))
            .ensure_valid_period()
            .is_ok());
        assert!(matches!(
            reservation(start, start).ensure_valid_period(),
            Err(AppError::BadRequest(_))
        ));
        assert!(reservation(start, start - Duration::hours(1))
            .ensure_valid_period()
            .is_err());
    }
}
