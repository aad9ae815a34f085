use crate::model::{
    id::ReservationId,
    reservation::{
        event::{CreateReservation, DeleteReservation, UpdateReservationStatus},
        Reservation,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Reservations starting at `since` or later, newest first.
    async fn find_since(&self, since: DateTime<Utc>, limit: i64) -> AppResult<Vec<Reservation>>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;
    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<Reservation>;
    async fn delete(&self, event: DeleteReservation) -> AppResult<()>;
}
