use crate::database::{model::category::CategoryRow, unique_violation_as, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{category::Category, id::CategoryId},
    repository::category::CategoryRepository,
};
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct CategoryRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT category_id, name FROM categories ORDER BY name ASC",
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create_many(&self, names: Vec<String>) -> AppResult<Vec<Category>> {
        let mut tx = self.db.begin().await?;
        let mut created = Vec::with_capacity(names.len());

        for name in names {
            let row = sqlx::query_as::<_, CategoryRow>(
                r#"
                    INSERT INTO categories (category_id, name)
                    VALUES ($1, $2)
                    RETURNING category_id, name
                "#,
            )
            .bind(CategoryId::new())
            .bind(&name)
            .fetch_one(&mut *tx)
            .await
            .map_err(unique_violation_as(format!("La categoría '{name}' ya existe")))?;
            created.push(Category::from(row));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(created)
    }

    async fn delete_by_name(&self, name: String) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let category_id: CategoryId =
            sqlx::query_scalar("SELECT category_id FROM categories WHERE name = $1")
                .bind(&name)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?
                .ok_or_else(|| {
                    AppError::EntityNotFound(format!("La categoría '{name}' no existe"))
                })?;

        let deleted = sqlx::query("DELETE FROM resources WHERE category_id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        tracing::info!(
            category = %name,
            resources = deleted.rows_affected(),
            "deleting category with its resources"
        );

        sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_create_and_delete_categories(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = CategoryRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo
            .create_many(vec!["Proyectores".into(), "Laptops".into()])
            .await?;
        assert_eq!(created.len(), 2);

        let names: Vec<_> = repo.find_all().await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Laptops", "Proyectores"]);

        let res = repo.create_many(vec!["Laptops".into()]).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        repo.delete_by_name("Laptops".into()).await?;
        let res = repo.delete_by_name("Laptops".into()).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }
}
