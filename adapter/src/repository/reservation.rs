use crate::database::{model::reservation::ReservationRow, ConnectionPool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::{
    model::{
        id::ReservationId,
        reservation::{
            event::{CreateReservation, DeleteReservation, UpdateReservationStatus},
            Reservation,
        },
    },
    repository::reservation::ReservationRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::types::Json;

const SELECT_RESERVATIONS: &str = r#"
    SELECT
        r.reservation_id,
        r.user_id,
        u.name AS user_name,
        u.role AS user_role,
        u.dni AS user_dni,
        u.email AS user_email,
        r.purpose,
        r.purpose_details,
        r.start_time,
        r.end_time,
        r.status
    FROM reservations AS r
    LEFT OUTER JOIN users AS u ON u.user_id = r.user_id
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn find_since(&self, since: DateTime<Utc>, limit: i64) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATIONS} WHERE r.start_time >= $1 ORDER BY r.start_time DESC LIMIT $2"
        ))
        .bind(since)
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Reservation::try_from)
        .collect()
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATIONS} WHERE r.reservation_id = $1"
        ))
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Reservation::try_from)
        .transpose()
    }

    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        event.ensure_valid_period()?;

        let reservation_id = ReservationId::new();
        let purpose_details =
            (!event.purpose_details.is_empty()).then(|| Json(&event.purpose_details));

        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, user_id, purpose, purpose_details, start_time, end_time, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reservation_id)
        .bind(event.user_id)
        .bind(event.purpose.as_ref())
        .bind(purpose_details)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.status.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been created".into(),
            ));
        }

        self.find_by_id(reservation_id).await?.ok_or_else(|| {
            AppError::EntityNotFound(format!("Reserva ({reservation_id}) no encontrada"))
        })
    }

    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<Reservation> {
        let res = sqlx::query("UPDATE reservations SET status = $2 WHERE reservation_id = $1")
            .bind(event.reservation_id)
            .bind(event.status.as_ref())
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "Reserva ({}) no encontrada",
                event.reservation_id
            )));
        }

        self.find_by_id(event.reservation_id).await?.ok_or_else(|| {
            AppError::EntityNotFound(format!("Reserva ({}) no encontrada", event.reservation_id))
        })
    }

    async fn delete(&self, event: DeleteReservation) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM reservations WHERE reservation_id = $1")
            .bind(event.reservation_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "Reserva ({}) no encontrada",
                event.reservation_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use kernel::model::{
        id::UserId,
        loan::{Purpose, PurposeDetails},
        reservation::ReservationStatus,
        user::UserSummary,
    };

    fn booking(start_time: DateTime<Utc>) -> CreateReservation {
        CreateReservation {
            user_id: UserId::new(),
            purpose: Purpose::Institucional,
            purpose_details: PurposeDetails::default(),
            start_time,
            end_time: start_time + Duration::hours(2),
            status: ReservationStatus::default(),
        }
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_reservations_of_missing_users(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));
        let now = Utc::now();

        let recent = repo.create(booking(now)).await?;
        assert_eq!(recent.status, ReservationStatus::Confirmada);
        assert_eq!(recent.user.name, UserSummary::UNKNOWN_NAME);
        repo.create(booking(now - Duration::days(45))).await?;

        let listed = repo.find_since(now - Duration::days(30), 500).await?;
        assert_eq!(listed.len(), 1);

        let updated = repo
            .update_status(UpdateReservationStatus {
                reservation_id: recent.id,
                status: ReservationStatus::NoAsistio,
            })
            .await?;
        assert_eq!(updated.status, ReservationStatus::NoAsistio);

        repo.delete(DeleteReservation {
            reservation_id: recent.id,
        })
        .await?;
        let res = repo
            .delete(DeleteReservation {
                reservation_id: recent.id,
            })
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }
}
