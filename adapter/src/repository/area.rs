use crate::database::{model::area::AreaRow, unique_violation_as, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        area::{Area, UpdateArea},
        id::AreaId,
    },
    repository::area::AreaRepository,
};
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct AreaRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AreaRepository for AreaRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Area>> {
        let rows = sqlx::query_as::<_, AreaRow>("SELECT area_id, name FROM areas ORDER BY name ASC")
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Area::from).collect())
    }

    async fn create_many(&self, names: Vec<String>) -> AppResult<Vec<Area>> {
        let mut tx = self.db.begin().await?;
        let mut created = Vec::with_capacity(names.len());

        for name in names {
            let row = sqlx::query_as::<_, AreaRow>(
                "INSERT INTO areas (area_id, name) VALUES ($1, $2) RETURNING area_id, name",
            )
            .bind(AreaId::new())
            .bind(&name)
            .fetch_one(&mut *tx)
            .await
            .map_err(unique_violation_as(format!("El área '{name}' ya existe")))?;
            created.push(row.into());
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(created)
    }

    async fn update(&self, event: UpdateArea) -> AppResult<Area> {
        let UpdateArea { area_id, name } = event;
        sqlx::query_as::<_, AreaRow>(
            "UPDATE areas SET name = $2 WHERE area_id = $1 RETURNING area_id, name",
        )
        .bind(area_id)
        .bind(&name)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(unique_violation_as(format!("El área '{name}' ya existe")))?
        .map(Area::from)
        .ok_or_else(|| AppError::EntityNotFound(format!("Área ({area_id}) no encontrada")))
    }

    async fn delete(&self, area_id: AreaId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM areas WHERE area_id = $1")
            .bind(area_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "Área ({area_id}) no encontrada"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_areas(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = AreaRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo
            .create_many(vec!["Matemática".into(), "Comunicación".into()])
            .await?;
        let names: Vec<_> = repo.find_all().await?.into_iter().map(|a| a.name).collect();
        assert_eq!(names, ["Comunicación", "Matemática"]);

        let renamed = repo
            .update(UpdateArea {
                area_id: created[0].id,
                name: "Matemáticas".into(),
            })
            .await?;
        assert_eq!(renamed.name, "Matemáticas");

        repo.delete(created[1].id).await?;
        assert!(matches!(
            repo.delete(created[1].id).await,
            Err(AppError::EntityNotFound(_))
        ));
        Ok(())
    }
}
