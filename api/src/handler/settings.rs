use crate::{
    extractor::{AppJson, AuthorizedUser},
    model::settings::{SettingsResponse, UpdateSettingsRequest},
};
use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_settings(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SettingsResponse>> {
    registry
        .settings_repository()
        .find()
        .await
        .map(SettingsResponse::from)
        .map(Json)
}

pub async fn update_settings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateSettingsRequest>,
) -> AppResult<Json<SettingsResponse>> {
    user.require_admin()?;

    registry
        .settings_repository()
        .update(req.into())
        .await
        .map(SettingsResponse::from)
        .map(Json)
}

#[cfg(test)]
mod tests {
    use crate::testing::{request, send, user_with_role, Mocks, TOKEN};
    use axum::http::{Method, StatusCode};
    use kernel::{
        model::{role::Role, settings::AppSettings},
        repository::settings::{MockSettingsRepository, SettingsRepository},
    };
    use serde_json::json;
    use std::sync::Arc;

    fn defaults() -> AppSettings {
        AppSettings {
            app_name: "Gestor de Recursos".into(),
            school_name: "Institución Educativa".into(),
            logo_url: String::new(),
            primary_color: "#1e40af".into(),
            is_public_registration_enabled: false,
            background_image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn settings_are_public() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_find().returning(|| Ok(defaults()));
        let repo: Arc<dyn SettingsRepository> = Arc::new(repo);
        let mut mocks = Mocks::anonymous();
        mocks
            .registry
            .expect_settings_repository()
            .returning(move || repo.clone());

        let (status, body) = send(
            mocks.into_registry(),
            request(Method::GET, "/api/settings", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appName"], "Gestor de Recursos");
        assert_eq!(body["isPublicRegistrationEnabled"], false);
    }

    #[tokio::test]
    async fn only_admins_change_settings() {
        let docente = user_with_role(Role::Docente);
        let mut repo = MockSettingsRepository::new();
        repo.expect_update().never();
        let repo: Arc<dyn SettingsRepository> = Arc::new(repo);
        let mut mocks = Mocks::signed_in(&docente);
        mocks
            .registry
            .expect_settings_repository()
            .returning(move || repo.clone());

        let (status, _) = send(
            mocks.into_registry(),
            request(
                Method::PUT,
                "/api/settings",
                Some(TOKEN),
                Some(json!({ "isPublicRegistrationEnabled": true })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
