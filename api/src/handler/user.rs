use crate::{
    extractor::{ActionJson, AppJson, AppQuery, AuthorizedUser, MaybeAuthorizedUser},
    model::{
        user::{
            DeleteUserQuery, RegisterUserRequestWithRole, UpdateUserPasswordRequest,
            UpdateUserPasswordRequestWithUserId, UpdateUserRequest, UserAction, UserListQuery,
            UserResponse,
        },
        SuccessResponse,
    },
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use garde::Validate;
use kernel::model::{role::Role, user::event::DeleteUser};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn list_users(
    _user: AuthorizedUser,
    AppQuery(query): AppQuery<UserListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<UserResponse>>> {
    query.validate(&())?;

    registry
        .user_repository()
        .find_all(query.into())
        .await
        .map(|users| users.into_iter().map(UserResponse::from).collect())
        .map(Json)
}

pub async fn user_action(
    MaybeAuthorizedUser(user): MaybeAuthorizedUser,
    State(registry): State<AppRegistry>,
    ActionJson(action): ActionJson<UserAction>,
) -> AppResult<Response> {
    match action {
        UserAction::Add(req) => {
            user.ok_or(AppError::UnauthorizedError)?.require_admin()?;
            req.validate(&())?;

            let created = registry.user_repository().create(req.into()).await?;
            Ok((StatusCode::CREATED, Json(UserResponse::from(created))).into_response())
        }
        UserAction::AddMultiple(req) => {
            user.ok_or(AppError::UnauthorizedError)?.require_admin()?;
            req.validate(&())?;

            let mut created = Vec::with_capacity(req.users.len());
            for (index, item) in req.users.into_iter().enumerate() {
                if let Err(e) = item.validate(&()) {
                    tracing::warn!(index, error = %e, "skipping invalid user");
                    continue;
                }
                match registry.user_repository().create(item.into()).await {
                    Ok(user) => created.push(UserResponse::from(user)),
                    Err(e) => tracing::warn!(index, error = %e, "skipping user that could not be created"),
                }
            }
            Ok((StatusCode::CREATED, Json(created)).into_response())
        }
        UserAction::Register(req) => {
            req.validate(&())?;

            let role = match &user {
                Some(caller) if caller.is_admin() => {
                    req.role.map(Role::from).unwrap_or_default()
                }
                Some(_) => return Err(AppError::ForbiddenOperation),
                None => {
                    let settings = registry.settings_repository().find().await?;
                    if !settings.is_public_registration_enabled {
                        return Err(AppError::ForbiddenOperation);
                    }
                    Role::Docente
                }
            };

            let created = registry
                .user_repository()
                .create(RegisterUserRequestWithRole::new(req, role).into())
                .await?;
            Ok((StatusCode::CREATED, Json(UserResponse::from(created))).into_response())
        }
    }
}

pub async fn update_user(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    req.validate(&())?;
    user.require_self_or_admin(req.user_id)?;
    if !user.is_admin() && req.role.is_some_and(|role| Role::from(role) != user.role()) {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .user_repository()
        .update(req.into())
        .await
        .map(UserResponse::from)
        .map(Json)
}

pub async fn delete_user(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppQuery(query): AppQuery<DeleteUserQuery>,
) -> AppResult<Json<SuccessResponse>> {
    user.require_admin()?;
    if query.user_id == user.id() {
        return Err(AppError::UnprocessableEntity(
            "No puedes eliminar tu propia cuenta".into(),
        ));
    }

    registry
        .user_repository()
        .delete(DeleteUser {
            user_id: query.user_id,
        })
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn change_password(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateUserPasswordRequest>,
) -> AppResult<Json<SuccessResponse>> {
    req.validate(&())?;

    registry
        .user_repository()
        .update_password(UpdateUserPasswordRequestWithUserId::new(user.id(), req).into())
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests {
    use crate::testing::{request, send, user_with_role, Mocks, TOKEN};
    use axum::http::{Method, StatusCode};
    use chrono::Utc;
    use kernel::{
        model::{role::Role, settings::AppSettings, user::User},
        repository::settings::{MockSettingsRepository, SettingsRepository},
    };
    use serde_json::json;
    use shared::error::AppError;
    use std::sync::Arc;

    fn settings(is_public_registration_enabled: bool) -> Arc<dyn SettingsRepository> {
        let mut repo = MockSettingsRepository::new();
        repo.expect_find().returning(move || {
            Ok(AppSettings {
                app_name: "Gestor de Recursos".into(),
                school_name: "Institución Educativa".into(),
                logo_url: String::new(),
                primary_color: "#1e40af".into(),
                is_public_registration_enabled,
                background_image_url: String::new(),
            })
        });
        Arc::new(repo)
    }

    fn registration() -> serde_json::Value {
        json!({
            "action": "register",
            "name": "Luis",
            "email": "luis@colegio.edu",
            "password": "secreto",
            "dni": "12345678",
            "role": "Admin"
        })
    }

    #[tokio::test]
    async fn public_registration_forces_the_docente_role() {
        let mut mocks = Mocks::anonymous();
        let settings = settings(true);
        mocks
            .registry
            .expect_settings_repository()
            .returning(move || settings.clone());
        mocks
            .users
            .expect_create()
            .withf(|event| event.role == Role::Docente && event.password.is_some())
            .returning(|event| {
                Ok(User {
                    id: Default::default(),
                    name: event.name,
                    email: event.email,
                    role: event.role,
                    dni: event.dni,
                    created_at: Utc::now(),
                })
            });

        let (status, body) = send(
            mocks.into_registry(),
            request(Method::POST, "/api/users", None, Some(registration())),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "Docente");
    }

    #[tokio::test]
    async fn closed_registration_is_forbidden() {
        let mut mocks = Mocks::anonymous();
        let settings = settings(false);
        mocks
            .registry
            .expect_settings_repository()
            .returning(move || settings.clone());

        let (status, _) = send(
            mocks.into_registry(),
            request(Method::POST, "/api/users", None, Some(registration())),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn only_admins_add_users() {
        let auxiliar = user_with_role(Role::Auxiliar);
        let (status, _) = send(
            Mocks::signed_in(&auxiliar).into_registry(),
            request(
                Method::POST,
                "/api/users",
                Some(TOKEN),
                Some(json!({ "action": "add", "name": "Rosa", "role": "Docente" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admins_cannot_delete_themselves() {
        let admin = user_with_role(Role::Admin);
        let (status, body) = send(
            Mocks::signed_in(&admin).into_registry(),
            request(
                Method::DELETE,
                &format!("/api/users?userId={}", admin.id),
                Some(TOKEN),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn users_cannot_promote_themselves() {
        let docente = user_with_role(Role::Docente);
        let (status, _) = send(
            Mocks::signed_in(&docente).into_registry(),
            request(
                Method::PUT,
                "/api/users",
                Some(TOKEN),
                Some(json!({ "userId": docente.id, "role": "Admin" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn add_multiple_skips_invalid_and_failing_users() {
        let admin = user_with_role(Role::Admin);
        let mut mocks = Mocks::signed_in(&admin);
        mocks
            .users
            .expect_create()
            .times(2)
            .returning(|event| {
                if event.name == "Duplicado" {
                    return Err(AppError::UnprocessableEntity(
                        "El email ya está registrado".into(),
                    ));
                }
                Ok(User {
                    id: Default::default(),
                    name: event.name,
                    email: event.email,
                    role: event.role,
                    dni: event.dni,
                    created_at: Utc::now(),
                })
            });

        let (status, body) = send(
            mocks.into_registry(),
            request(
                Method::POST,
                "/api/users",
                Some(TOKEN),
                Some(json!({
                    "action": "addMultiple",
                    "users": [
                        { "name": "Rosa", "email": "rosa@colegio.edu", "role": "Docente" },
                        { "name": "Sin Dominio", "email": "sin-dominio", "role": "Docente" },
                        { "name": "Duplicado", "email": "admin@colegio.edu", "role": "Auxiliar" }
                    ]
                })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let created = body.as_array().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0]["name"], "Rosa");
    }

    #[tokio::test]
    async fn registration_with_a_failing_token_store_is_not_anonymous() {
        let mut mocks = Mocks::anonymous();
        mocks
            .auth
            .expect_fetch_user_id_from_token()
            .returning(|_| Err(AppError::ConversionEntityError("almacén no disponible".into())));
        mocks.registry.expect_settings_repository().never();

        let (status, _) = send(
            mocks.into_registry(),
            request(Method::POST, "/api/users", Some(TOKEN), Some(registration())),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn registration_with_an_unknown_token_is_401() {
        let mut mocks = Mocks::anonymous();
        mocks
            .auth
            .expect_fetch_user_id_from_token()
            .returning(|_| Ok(None));
        mocks.registry.expect_settings_repository().never();

        let (status, _) = send(
            mocks.into_registry(),
            request(Method::POST, "/api/users", Some(TOKEN), Some(registration())),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
