use crate::database::{
    model::resource::{ResourceRow, ResourceStateRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{CategoryId, ResourceId},
        resource::{
            event::{CreateResources, DeleteResource, UpdateResource, UpdateResourceStatus},
            ensure_batch_quantity, last_resource_number, numbered_names, DamageNotesChange,
            Resource, ResourceStatus,
        },
    },
    repository::resource::ResourceRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::types::Json;
use uuid::Uuid;

const SELECT_RESOURCES: &str = r#"
    SELECT
        r.resource_id,
        r.name,
        r.brand,
        r.model,
        r.status,
        r.stock,
        r.damage_notes,
        c.name AS category_name,
        r.attributes,
        r.notes,
        r.related_accessories,
        r.is_accessory,
        r.compatible_with
    FROM resources AS r
    LEFT OUTER JOIN categories AS c ON c.category_id = r.category_id
"#;

/// Loads the given resources through any executor, so workflows can read
/// back what they changed inside their own transaction.
pub(crate) async fn select_resources<'e, E>(executor: E, ids: &[ResourceId]) -> AppResult<Vec<Resource>>
where
    E: sqlx::PgExecutor<'e>,
{
    let ids: Vec<Uuid> = ids.iter().map(|id| id.raw()).collect();
    sqlx::query_as::<_, ResourceRow>(&format!(
        "{SELECT_RESOURCES} WHERE r.resource_id = ANY($1) ORDER BY r.name ASC"
    ))
    .bind(ids)
    .fetch_all(executor)
    .await
    .map_err(AppError::SpecificOperationError)?
    .into_iter()
    .map(Resource::try_from)
    .collect()
}

/// Locks the given resources for the rest of the transaction. Fails when
/// any of them does not exist.
pub(crate) async fn lock_resources(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ids: &[ResourceId],
) -> AppResult<Vec<ResourceStateRow>> {
    let raw: Vec<Uuid> = ids.iter().map(|id| id.raw()).collect();
    let mut rows = sqlx::query_as::<_, ResourceStateRow>(
        r#"
            SELECT resource_id, name, brand, status
            FROM resources
            WHERE resource_id = ANY($1)
            FOR UPDATE
        "#,
    )
    .bind(raw)
    .fetch_all(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    // Keep the caller's order; it is the order the loan lists them in.
    ids.iter()
        .map(|id| {
            let pos = rows
                .iter()
                .position(|row| row.resource_id == *id)
                .ok_or_else(|| AppError::EntityNotFound(format!("Recurso ({id}) no encontrado")))?;
            Ok(rows.swap_remove(pos))
        })
        .collect()
}

/// Fails with 422 naming the first resource that is not available.
pub(crate) fn ensure_all_available(rows: &[ResourceStateRow]) -> AppResult<()> {
    for row in rows {
        if !row.status()?.is_available() {
            return Err(AppError::UnprocessableEntity(format!(
                "El recurso {} no está disponible (estado: {})",
                row.name, row.status
            )));
        }
    }
    Ok(())
}

pub(crate) async fn set_status(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    resource_ids: &[ResourceId],
    status: ResourceStatus,
) -> AppResult<()> {
    let raw: Vec<Uuid> = resource_ids.iter().map(|id| id.raw()).collect();
    sqlx::query("UPDATE resources SET status = $2 WHERE resource_id = ANY($1)")
        .bind(raw)
        .bind(status.as_ref())
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
    Ok(())
}

#[derive(new)]
pub struct ResourceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ResourceRepository for ResourceRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Resource>> {
        sqlx::query_as::<_, ResourceRow>(&format!("{SELECT_RESOURCES} ORDER BY c.name, r.name"))
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Resource::try_from)
            .collect()
    }

    async fn create(&self, event: CreateResources) -> AppResult<Vec<Resource>> {
        ensure_batch_quantity(event.quantity)?;

        let mut tx = self.db.begin().await?;

        let category_id: CategoryId =
            sqlx::query_scalar("SELECT category_id FROM categories WHERE name = $1")
                .bind(&event.category)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?
                .ok_or_else(|| {
                    AppError::EntityNotFound(format!("La categoría '{}' no existe", event.category))
                })?;

        // Lock the category row so concurrent additions number sequentially.
        sqlx::query("SELECT 1 FROM categories WHERE category_id = $1 FOR UPDATE")
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let existing: Vec<String> =
            sqlx::query_scalar("SELECT name FROM resources WHERE category_id = $1")
                .bind(category_id)
                .fetch_all(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let last = last_resource_number(existing.iter().map(String::as_str));

        let related: Vec<Uuid> = event.related_accessories.iter().map(|id| id.raw()).collect();
        let compatible: Vec<Uuid> = event.compatible_with.iter().map(|id| id.raw()).collect();
        let mut ids = Vec::with_capacity(event.quantity as usize);

        for name in numbered_names(&event.category, last, event.quantity)? {
            let resource_id = ResourceId::new();
            sqlx::query(
                r#"
                    INSERT INTO resources (
                        resource_id, name, brand, model, status, stock, category_id,
                        attributes, notes, related_accessories, is_accessory, compatible_with
                    )
                    VALUES ($1, $2, $3, $4, $5, 1, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(resource_id)
            .bind(name)
            .bind(&event.brand)
            .bind(&event.model)
            .bind(ResourceStatus::Available.as_ref())
            .bind(category_id)
            .bind(Json(&event.attributes))
            .bind(&event.notes)
            .bind(&related)
            .bind(event.is_accessory)
            .bind(&compatible)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
            ids.push(resource_id);
        }

        let created = select_resources(&mut *tx, &ids).await?;
        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(created)
    }

    async fn update(&self, event: UpdateResource) -> AppResult<Resource> {
        let UpdateResource {
            resource_id,
            brand,
            model,
            notes,
            attributes,
        } = event;

        let res = sqlx::query(
            r#"
                UPDATE resources SET
                    brand = COALESCE($2, brand),
                    model = COALESCE($3, model),
                    notes = COALESCE($4, notes),
                    attributes = COALESCE($5, attributes)
                WHERE resource_id = $1
            "#,
        )
        .bind(resource_id)
        .bind(brand)
        .bind(model)
        .bind(notes)
        .bind(attributes.map(Json))
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "Recurso ({resource_id}) no encontrado"
            )));
        }
        self.find_one(resource_id).await
    }

    async fn update_status(&self, event: UpdateResourceStatus) -> AppResult<Resource> {
        let UpdateResourceStatus {
            resource_id,
            status,
            notes,
        } = event;

        let res = match status.damage_notes_change(notes) {
            DamageNotesChange::Keep => {
                sqlx::query("UPDATE resources SET status = $2 WHERE resource_id = $1")
                    .bind(resource_id)
                    .bind(status.as_ref())
                    .execute(self.db.inner_ref())
                    .await
            }
            DamageNotesChange::Set(damage_notes) => sqlx::query(
                "UPDATE resources SET status = $2, damage_notes = $3 WHERE resource_id = $1",
            )
            .bind(resource_id)
            .bind(status.as_ref())
            .bind(damage_notes)
            .execute(self.db.inner_ref())
            .await,
        }
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "Recurso ({resource_id}) no encontrado"
            )));
        }
        self.find_one(resource_id).await
    }

    async fn delete(&self, event: DeleteResource) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let state = lock_resources(&mut tx, &[event.resource_id]).await?;
        if let Some(row) = state.first() {
            if row.status()? == ResourceStatus::Loaned {
                return Err(AppError::UnprocessableEntity(format!(
                    "El recurso {} está prestado y no puede eliminarse",
                    row.name
                )));
            }
        }

        sqlx::query("DELETE FROM resources WHERE resource_id = $1")
            .bind(event.resource_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }
}

impl ResourceRepositoryImpl {
    async fn find_one(&self, resource_id: ResourceId) -> AppResult<Resource> {
        select_resources(self.db.inner_ref(), &[resource_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::EntityNotFound(format!("Recurso ({resource_id}) no encontrado")))
    }
}
