use crate::database::{model::settings::AppSettingsRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::settings::{AppSettings, UpdateAppSettings},
    repository::settings::SettingsRepository,
};
use shared::error::{AppError, AppResult};

const SETTINGS_COLUMNS: &str = r#"
    app_name, school_name, logo_url, primary_color,
    is_public_registration_enabled, background_image_url
"#;

#[derive(new)]
pub struct SettingsRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SettingsRepository for SettingsRepositoryImpl {
    async fn find(&self) -> AppResult<AppSettings> {
        sqlx::query_as::<_, AppSettingsRow>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM app_settings WHERE id = 1"
        ))
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(AppSettings::from)
        .ok_or_else(|| AppError::EntityNotFound("No se encontraron los ajustes".into()))
    }

    async fn update(&self, event: UpdateAppSettings) -> AppResult<AppSettings> {
        if event.is_empty() {
            return self.find().await;
        }

        let UpdateAppSettings {
            app_name,
            school_name,
            logo_url,
            primary_color,
            is_public_registration_enabled,
            background_image_url,
        } = event;

        sqlx::query_as::<_, AppSettingsRow>(&format!(
            r#"
                UPDATE app_settings SET
                    app_name = COALESCE($1, app_name),
                    school_name = COALESCE($2, school_name),
                    logo_url = COALESCE($3, logo_url),
                    primary_color = COALESCE($4, primary_color),
                    is_public_registration_enabled = COALESCE($5, is_public_registration_enabled),
                    background_image_url = COALESCE($6, background_image_url)
                WHERE id = 1
                RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .bind(app_name)
        .bind(school_name)
        .bind(logo_url)
        .bind(primary_color)
        .bind(is_public_registration_enabled)
        .bind(background_image_url)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(AppSettings::from)
        .ok_or_else(|| AppError::EntityNotFound("No se encontraron los ajustes".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_partial_settings_update(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = SettingsRepositoryImpl::new(ConnectionPool::new(pool));
        let before = repo.find().await?;

        let unchanged = repo.update(UpdateAppSettings::default()).await?;
        assert_eq!(unchanged, before);

        let after = repo
            .update(UpdateAppSettings {
                is_public_registration_enabled: Some(false),
                ..Default::default()
            })
            .await?;
        assert!(!after.is_public_registration_enabled);
        assert_eq!(after.app_name, before.app_name);
        Ok(())
    }
}
