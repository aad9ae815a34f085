use crate::{
    database::{
        model::{loan::LoanRow, user::UserRow},
        set_transaction_serializable, ConnectionPool,
    },
    repository::resource::{ensure_all_available, lock_resources, select_resources, set_status},
};
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::{
    model::{
        id::{LoanId, UserId},
        loan::{
            event::{CreateLoan, ProcessReturn},
            returned_resource_states, DamageReports, Loan, LoanStatus, LoanedResource,
            SuggestionReports,
        },
        resource::{Resource, ResourceStatus},
        user::User,
    },
    repository::loan::LoanRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::types::Json;

const SELECT_LOANS: &str = r#"
    SELECT
        l.loan_id,
        l.user_id,
        u.name AS user_name,
        u.role AS user_role,
        u.dni AS user_dni,
        u.email AS user_email,
        l.purpose,
        l.purpose_details,
        l.loan_date,
        l.return_date,
        l.status,
        l.resources,
        l.damage_reports,
        l.suggestion_reports,
        l.missing_resources
    FROM loans AS l
    LEFT OUTER JOIN users AS u ON u.user_id = l.user_id
"#;

const LOAN_ORDER: &str = "ORDER BY l.return_date DESC NULLS LAST, l.loan_date DESC";

#[derive(new)]
pub struct LoanRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl LoanRepository for LoanRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Loan>> {
        sqlx::query_as::<_, LoanRow>(&format!("{SELECT_LOANS} {LOAN_ORDER}"))
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Loan::try_from)
            .collect()
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Loan>> {
        sqlx::query_as::<_, LoanRow>(&format!(
            "{SELECT_LOANS} WHERE l.user_id = $1 {LOAN_ORDER}"
        ))
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Loan::try_from)
        .collect()
    }

    async fn find_by_id(&self, loan_id: LoanId) -> AppResult<Option<Loan>> {
        sqlx::query_as::<_, LoanRow>(&format!("{SELECT_LOANS} WHERE l.loan_id = $1"))
            .bind(loan_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Loan::try_from)
            .transpose()
    }

    async fn create(&self, event: CreateLoan) -> AppResult<Loan> {
        if event.resource_ids.is_empty() {
            return Err(AppError::BadRequest(
                "El préstamo debe incluir al menos un recurso".into(),
            ));
        }

        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        let borrower: User = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, name, email, role, dni, created_at FROM users WHERE user_id = $1",
        )
        .bind(event.user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound(format!("Usuario ({}) no encontrado", event.user_id)))?
        .try_into()?;

        let states = lock_resources(&mut tx, &event.resource_ids).await?;
        let status = if event.is_direct_approval() {
            ensure_all_available(&states)?;
            set_status(&mut tx, &event.resource_ids, ResourceStatus::Loaned).await?;
            LoanStatus::Active
        } else {
            LoanStatus::Pending
        };

        let resources: Vec<LoanedResource> = states
            .into_iter()
            .map(|s| LoanedResource {
                id: s.resource_id,
                name: s.name,
                brand: s.brand,
            })
            .collect();
        let loan_id = LoanId::new();
        let loan_date = Utc::now();
        let purpose_details = (!event.purpose_details.is_empty()).then(|| Json(&event.purpose_details));

        let res = sqlx::query(
            r#"
                INSERT INTO loans (loan_id, user_id, purpose, purpose_details, loan_date, status, resources)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(loan_id)
        .bind(event.user_id)
        .bind(event.purpose.as_ref())
        .bind(purpose_details)
        .bind(loan_date)
        .bind(status.as_ref())
        .bind(Json(&resources))
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No loan record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(%loan_id, %status, resources = resources.len(), "loan created");

        Ok(Loan {
            id: loan_id,
            user: borrower.summary(),
            purpose: event.purpose,
            purpose_details: event.purpose_details,
            loan_date,
            return_date: None,
            status,
            resources,
            damage_reports: DamageReports::new(),
            suggestion_reports: SuggestionReports::new(),
            missing_resources: vec![],
        })
    }

    async fn approve(&self, loan_id: LoanId) -> AppResult<(Loan, Vec<Resource>)> {
        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        let mut loan = lock_loan(&mut tx, loan_id).await?;
        loan.status.ensure_transition(LoanStatus::Active)?;

        let resource_ids = loan.resource_ids();
        let states = lock_resources(&mut tx, &resource_ids).await?;
        ensure_all_available(&states)?;
        set_status(&mut tx, &resource_ids, ResourceStatus::Loaned).await?;

        let now = Utc::now();
        sqlx::query("UPDATE loans SET status = $2, loan_date = $3 WHERE loan_id = $1")
            .bind(loan_id)
            .bind(LoanStatus::Active.as_ref())
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let resources = select_resources(&mut *tx, &resource_ids).await?;
        tx.commit().await.map_err(AppError::TransactionError)?;

        loan.status = LoanStatus::Active;
        loan.loan_date = now;
        Ok((loan, resources))
    }

    async fn reject(&self, loan_id: LoanId) -> AppResult<Loan> {
        let mut tx = self.db.begin().await?;

        let mut loan = lock_loan(&mut tx, loan_id).await?;
        loan.status.ensure_transition(LoanStatus::Rejected)?;

        let now = Utc::now();
        sqlx::query("UPDATE loans SET status = $2, return_date = $3 WHERE loan_id = $1")
            .bind(loan_id)
            .bind(LoanStatus::Rejected.as_ref())
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        loan.status = LoanStatus::Rejected;
        loan.return_date = Some(now);
        Ok(loan)
    }

    async fn process_return(&self, event: ProcessReturn) -> AppResult<(Loan, Vec<Resource>)> {
        let ProcessReturn {
            loan_id,
            damage_reports,
            suggestion_reports,
            missing_resources,
        } = event;

        let mut tx = self.db.begin().await?;

        let mut loan = lock_loan(&mut tx, loan_id).await?;
        loan.status.ensure_transition(LoanStatus::Returned)?;

        for state in returned_resource_states(&loan.resources, &damage_reports) {
            sqlx::query(
                "UPDATE resources SET status = $2, damage_notes = $3 WHERE resource_id = $1",
            )
            .bind(state.resource_id)
            .bind(state.status.as_ref())
            .bind(state.damage_notes)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        let now = Utc::now();
        sqlx::query(
            r#"
                UPDATE loans SET
                    status = $2,
                    return_date = $3,
                    damage_reports = $4,
                    suggestion_reports = $5,
                    missing_resources = $6
                WHERE loan_id = $1
            "#,
        )
        .bind(loan_id)
        .bind(LoanStatus::Returned.as_ref())
        .bind(now)
        .bind(Json(&damage_reports))
        .bind(Json(&suggestion_reports))
        .bind(Json(&missing_resources))
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let resources = select_resources(&mut *tx, &loan.resource_ids()).await?;
        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(%loan_id, returned = resources.len(), "loan returned");

        loan.status = LoanStatus::Returned;
        loan.return_date = Some(now);
        loan.damage_reports = damage_reports;
        loan.suggestion_reports = suggestion_reports;
        loan.missing_resources = missing_resources;
        Ok((loan, resources))
    }
}

async fn lock_loan(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    loan_id: LoanId,
) -> AppResult<Loan> {
    sqlx::query_as::<_, LoanRow>(&format!(
        "{SELECT_LOANS} WHERE l.loan_id = $1 FOR UPDATE OF l"
    ))
    .bind(loan_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?
    .ok_or_else(|| AppError::EntityNotFound(format!("Préstamo ({loan_id}) no encontrado")))?
    .try_into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        category::CategoryRepositoryImpl, resource::ResourceRepositoryImpl,
        user::UserRepositoryImpl,
    };
    use kernel::{
        model::{
            loan::{DamageReport, Purpose, PurposeDetails},
            resource::event::CreateResources,
            role::Role,
            user::event::CreateUser,
        },
        repository::{
            category::CategoryRepository, resource::ResourceRepository, user::UserRepository,
        },
    };
    use std::collections::BTreeMap;

    async fn seed(db: &ConnectionPool) -> anyhow::Result<(UserId, Vec<Resource>)> {
        let user = UserRepositoryImpl::new(db.clone())
            .create(CreateUser {
                name: "Rosa Quispe".into(),
                email: Some("rosa@colegio.edu".into()),
                role: Role::Docente,
                dni: Some("40404040".into()),
                password: None,
            })
            .await?;
        CategoryRepositoryImpl::new(db.clone())
            .create_many(vec!["Laptops".into()])
            .await?;
        let resources = ResourceRepositoryImpl::new(db.clone())
            .create(CreateResources {
                category: "Laptops".into(),
                quantity: 2,
                brand: Some("HP".into()),
                model: None,
                notes: None,
                attributes: BTreeMap::new(),
                is_accessory: false,
                related_accessories: vec![],
                compatible_with: vec![],
            })
            .await?;
        Ok((user.id, resources))
    }

    fn request(user_id: UserId, resources: &[Resource], creator_role: Role) -> CreateLoan {
        CreateLoan::new(
            user_id,
            Purpose::Aprendizaje,
            PurposeDetails::default(),
            resources.iter().map(|r| r.id).collect(),
            creator_role,
        )
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_loan_lifecycle(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let (user_id, resources) = seed(&db).await?;
        let repo = LoanRepositoryImpl::new(db);

        let loan = repo.create(request(user_id, &resources, Role::Docente)).await?;
        assert_eq!(loan.status, LoanStatus::Pending);
        assert_eq!(loan.return_date, None);

        let (approved, taken) = repo.approve(loan.id).await?;
        assert_eq!(approved.status, LoanStatus::Active);
        assert!(taken.iter().all(|r| r.status == ResourceStatus::Loaned));

        let res = repo.reject(loan.id).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        let damaged = resources[0].id;
        let mut reports = DamageReports::new();
        reports.insert(
            damaged.to_string(),
            DamageReport {
                common_problems: vec!["no-power".into()],
                other_notes: "no enciende".into(),
            },
        );
        let (returned, back) = repo
            .process_return(ProcessReturn::new(
                loan.id,
                reports,
                SuggestionReports::new(),
                vec![],
            ))
            .await?;
        assert_eq!(returned.status, LoanStatus::Returned);
        assert!(returned.return_date.is_some());
        for resource in back {
            if resource.id == damaged {
                assert_eq!(resource.status, ResourceStatus::Damaged);
                assert_eq!(resource.damage_notes.as_deref(), Some("no enciende"));
            } else {
                assert_eq!(resource.status, ResourceStatus::Available);
            }
        }
        Ok(())
    }

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_direct_loan_requires_available_resources(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let (user_id, resources) = seed(&db).await?;
        let repo = LoanRepositoryImpl::new(db);

        let loan = repo.create(request(user_id, &resources, Role::Admin)).await?;
        assert_eq!(loan.status, LoanStatus::Active);

        let res = repo.create(request(user_id, &resources[..1], Role::Admin)).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        let mine = repo.find_by_user_id(user_id).await?;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user.name, "Rosa Quispe");
        Ok(())
    }
}
