use crate::database::{
    model::pedagogical_hour::PedagogicalHourRow, unique_violation_as, ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::PedagogicalHourId,
        pedagogical_hour::{PedagogicalHour, UpdatePedagogicalHour},
    },
    repository::pedagogical_hour::PedagogicalHourRepository,
};
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct PedagogicalHourRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PedagogicalHourRepository for PedagogicalHourRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<PedagogicalHour>> {
        let rows = sqlx::query_as::<_, PedagogicalHourRow>(
            "SELECT pedagogical_hour_id, name FROM pedagogical_hours ORDER BY name ASC",
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(PedagogicalHour::from).collect())
    }

    async fn create(&self, name: String) -> AppResult<PedagogicalHour> {
        sqlx::query_as::<_, PedagogicalHourRow>(
            r#"
                INSERT INTO pedagogical_hours (pedagogical_hour_id, name)
                VALUES ($1, $2)
                RETURNING pedagogical_hour_id, name
            "#,
        )
        .bind(PedagogicalHourId::new())
        .bind(&name)
        .fetch_one(self.db.inner_ref())
        .await
        .map(PedagogicalHour::from)
        .map_err(unique_violation_as(format!("La hora pedagógica '{name}' ya existe")))
    }

    async fn update(&self, event: UpdatePedagogicalHour) -> AppResult<PedagogicalHour> {
        let UpdatePedagogicalHour {
            pedagogical_hour_id,
            name,
        } = event;
        sqlx::query_as::<_, PedagogicalHourRow>(
            r#"
                UPDATE pedagogical_hours SET name = $2
                WHERE pedagogical_hour_id = $1
                RETURNING pedagogical_hour_id, name
            "#,
        )
        .bind(pedagogical_hour_id)
        .bind(&name)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(unique_violation_as(format!("La hora pedagógica '{name}' ya existe")))?
        .map(PedagogicalHour::from)
        .ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "Hora pedagógica ({pedagogical_hour_id}) no encontrada"
            ))
        })
    }

    async fn delete(&self, pedagogical_hour_id: PedagogicalHourId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM pedagogical_hours WHERE pedagogical_hour_id = $1")
            .bind(pedagogical_hour_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "Hora pedagógica ({pedagogical_hour_id}) no encontrada"
            )));
        }
        Ok(())
    }
}
