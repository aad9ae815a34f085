use crate::database::{
    model::user::UserRow, set_transaction_serializable, unique_violation_as, ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::UserId,
        list::ListOptions,
        user::{
            event::{CreateUser, DeleteUser, UpdateUser, UpdateUserPassword},
            normalize_email, User,
        },
    },
    repository::user::UserRepository,
};
use shared::error::{AppError, AppResult};

const USER_COLUMNS: &str = "user_id, name, email, role, dni, created_at";

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(normalize_email(email))
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_all(&self, options: ListOptions) -> AppResult<Vec<User>> {
        let ListOptions { limit, offset } = options;
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(User::try_from)
        .collect()
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let email = event.email.as_deref().map(normalize_email);
        let duplicated = format!(
            "El correo {} ya está registrado",
            email.as_deref().unwrap_or_default()
        );
        let password_hash = event
            .password
            .as_deref()
            .map(|password| bcrypt::hash(password, bcrypt::DEFAULT_COST))
            .transpose()?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
                INSERT INTO users (user_id, name, email, password_hash, role, dni)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(UserId::new())
        .bind(event.name.trim())
        .bind(email)
        .bind(password_hash)
        .bind(event.role.as_ref())
        .bind(event.dni)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(unique_violation_as(duplicated))?;

        User::try_from(row)
    }

    async fn update(&self, event: UpdateUser) -> AppResult<User> {
        let UpdateUser {
            user_id,
            name,
            email,
            role,
            dni,
        } = event;
        let email = email.as_deref().map(normalize_email);
        let duplicated = format!(
            "El correo {} ya está registrado",
            email.as_deref().unwrap_or_default()
        );

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
                UPDATE users SET
                    name = COALESCE($2, name),
                    email = COALESCE($3, email),
                    role = COALESCE($4, role),
                    dni = COALESCE($5, dni)
                WHERE user_id = $1
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(role.map(|r| r.to_string()))
        .bind(dni)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(unique_violation_as(duplicated))?
        .ok_or_else(|| AppError::EntityNotFound(format!("Usuario ({user_id}) no encontrado")))?;

        User::try_from(row)
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        let current_hash: Option<String> = sqlx::query_scalar::<_, Option<String>>(
            "SELECT password_hash FROM users WHERE user_id = $1",
        )
        .bind(event.user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("Usuario ({}) no encontrado", event.user_id))
        })?;

        let verified = match current_hash {
            Some(hash) => bcrypt::verify(&event.current_password, &hash)?,
            None => false,
        };
        if !verified {
            return Err(AppError::UnprocessableEntity(
                "La contraseña actual es incorrecta".into(),
            ));
        }

        let new_hash = bcrypt::hash(&event.new_password, bcrypt::DEFAULT_COST)?;
        sqlx::query("UPDATE users SET password_hash = $2 WHERE user_id = $1")
            .bind(event.user_id)
            .bind(new_hash)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn delete(&self, event: DeleteUser) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(event.user_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "Usuario ({}) no encontrado",
                event.user_id
            )));
        }
        Ok(())
    }
}
