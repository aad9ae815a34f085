use crate::database::{
    model::grade::{GradeRow, SectionRow},
    unique_violation_as, ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        grade::{
            event::{CreateSection, UpdateGrade, UpdateSection},
            Grade, Section,
        },
        id::{GradeId, SectionId},
    },
    repository::grade::GradeRepository,
};
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct GradeRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl GradeRepository for GradeRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Grade>> {
        let grades = sqlx::query_as::<_, GradeRow>(
            "SELECT grade_id, name FROM grades ORDER BY name ASC",
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let sections = sqlx::query_as::<_, SectionRow>(
            "SELECT section_id, grade_id, name, alias FROM sections ORDER BY name ASC",
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(Grade::assemble(
            grades.into_iter().map(Into::into).collect(),
            sections.into_iter().map(Section::from).collect(),
        ))
    }

    async fn create_grade(&self, name: String) -> AppResult<Grade> {
        let row = sqlx::query_as::<_, GradeRow>(
            "INSERT INTO grades (grade_id, name) VALUES ($1, $2) RETURNING grade_id, name",
        )
        .bind(GradeId::new())
        .bind(&name)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(unique_violation_as(format!("El grado '{name}' ya existe")))?;

        Ok(Grade {
            id: row.grade_id,
            name: row.name,
            sections: vec![],
        })
    }

    async fn create_section(&self, event: CreateSection) -> AppResult<Section> {
        let CreateSection { grade_id, name } = event;
        let mut tx = self.db.begin().await?;

        let grade_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM grades WHERE grade_id = $1)")
                .bind(grade_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if !grade_exists {
            return Err(AppError::EntityNotFound(format!(
                "Grado ({grade_id}) no encontrado"
            )));
        }

        let row = sqlx::query_as::<_, SectionRow>(
            r#"
                INSERT INTO sections (section_id, grade_id, name)
                VALUES ($1, $2, $3)
                RETURNING section_id, grade_id, name, alias
            "#,
        )
        .bind(SectionId::new())
        .bind(grade_id)
        .bind(&name)
        .fetch_one(&mut *tx)
        .await
        .map_err(unique_violation_as(format!(
            "La sección '{name}' ya existe en este grado"
        )))?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(row.into())
    }

    async fn update_grade(&self, event: UpdateGrade) -> AppResult<Grade> {
        let UpdateGrade { grade_id, name } = event;

        let row = sqlx::query_as::<_, GradeRow>(
            "UPDATE grades SET name = $2 WHERE grade_id = $1 RETURNING grade_id, name",
        )
        .bind(grade_id)
        .bind(&name)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(unique_violation_as(format!("El grado '{name}' ya existe")))?
        .ok_or_else(|| AppError::EntityNotFound(format!("Grado ({grade_id}) no encontrado")))?;

        let sections = sqlx::query_as::<_, SectionRow>(
            r#"
                SELECT section_id, grade_id, name, alias FROM sections
                WHERE grade_id = $1
                ORDER BY name ASC
            "#,
        )
        .bind(grade_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(Grade {
            id: row.grade_id,
            name: row.name,
            sections: sections.into_iter().map(Section::from).collect(),
        })
    }

    async fn update_section(&self, event: UpdateSection) -> AppResult<Section> {
        let UpdateSection {
            section_id,
            name,
            alias,
        } = event;

        sqlx::query_as::<_, SectionRow>(
            r#"
                UPDATE sections SET
                    name = COALESCE($2, name),
                    alias = COALESCE($3, alias)
                WHERE section_id = $1
                RETURNING section_id, grade_id, name, alias
            "#,
        )
        .bind(section_id)
        .bind(name)
        .bind(alias)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(unique_violation_as(
            "Ya existe una sección con ese nombre en el grado".into(),
        ))?
        .map(Section::from)
        .ok_or_else(|| AppError::EntityNotFound(format!("Sección ({section_id}) no encontrada")))
    }

    async fn delete_grade(&self, grade_id: GradeId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM grades WHERE grade_id = $1")
            .bind(grade_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "Grado ({grade_id}) no encontrado"
            )));
        }
        Ok(())
    }

    async fn delete_section(&self, section_id: SectionId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM sections WHERE section_id = $1")
            .bind(section_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "Sección ({section_id}) no encontrada"
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
    async fn test_grades_with_sections(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = GradeRepositoryImpl::new(ConnectionPool::new(pool));

        let grade = repo.create_grade("1ro Secundaria".into()).await?;
        let section = repo
            .create_section(CreateSection {
                grade_id: grade.id,
                name: "A".into(),
            })
            .await?;
        repo.update_section(UpdateSection {
            section_id: section.id,
            name: None,
            alias: Some("Los Cóndores".into()),
        })
        .await?;

        let grades = repo.find_all().await?;
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].sections[0].alias.as_deref(), Some("Los Cóndores"));

        let res = repo
            .create_section(CreateSection {
                grade_id: GradeId::new(),
                name: "B".into(),
            })
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        repo.delete_grade(grade.id).await?;
        assert!(matches!(
            repo.delete_section(section.id).await,
            Err(AppError::EntityNotFound(_))
        ));
        Ok(())
    }
}
