use crate::{
    extractor::{ActionJson, AppQuery, AuthorizedUser},
    model::{
        auth::{AccessTokenResponse, AuthAction, SessionResponse},
        user::UserResponse,
        ActionQuery, SuccessResponse,
    },
};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use garde::Validate;
use kernel::model::auth::event::CreateToken;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// Sign-in ignores whatever token the client still holds; the other actions
// need it to resolve.
pub async fn auth_action(
    user: Result<AuthorizedUser, AppError>,
    State(registry): State<AppRegistry>,
    ActionJson(action): ActionJson<AuthAction>,
) -> AppResult<Response> {
    match action {
        AuthAction::SignIn(req) => {
            let req = req.normalized();
            req.validate(&())?;
            let user_id = registry
                .auth_repository()
                .verify_user(&req.email, &req.password)
                .await?;
            let access_token = registry
                .auth_repository()
                .create_token(CreateToken::new(user_id))
                .await?;
            tracing::info!(%user_id, "signed in");
            Ok(Json(AccessTokenResponse::new(
                access_token,
                user_id,
                registry.auth_token_ttl(),
            ))
            .into_response())
        }
        AuthAction::SignOut => {
            let user = user?;
            registry
                .auth_repository()
                .delete_token(user.access_token)
                .await?;
            Ok(Json(SuccessResponse::ok()).into_response())
        }
        AuthAction::RefreshSession => {
            let user = user?;
            let user_id = user.id();
            let access_token = registry
                .auth_repository()
                .create_token(CreateToken::new(user_id))
                .await?;
            registry
                .auth_repository()
                .delete_token(user.access_token)
                .await?;
            Ok(Json(AccessTokenResponse::new(
                access_token,
                user_id,
                registry.auth_token_ttl(),
            ))
            .into_response())
        }
    }
}

pub async fn show_session(
    user: AuthorizedUser,
    AppQuery(query): AppQuery<ActionQuery>,
) -> AppResult<Response> {
    match query.action.as_deref() {
        Some("getCurrentUser") => Ok(Json(UserResponse::from(user.user)).into_response()),
        Some("getSession") => Ok(Json(SessionResponse {
            access_token: user.access_token.0,
            user: user.user.into(),
        })
        .into_response()),
        _ => Err(AppError::InvalidAction),
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{request, send, user_with_role, Mocks, TOKEN};
    use axum::http::{Method, StatusCode};
    use kernel::model::{auth::AccessToken, role::Role};
    use serde_json::json;
    use shared::error::AppError;

    #[tokio::test]
    async fn sign_in_returns_a_token() {
        let docente = user_with_role(Role::Docente);
        let user_id = docente.id;
        let mut mocks = Mocks::anonymous();
        mocks
            .auth
            .expect_verify_user()
            .withf(|email, password| {
                email.to_string() == "docente@colegio.edu" && password.to_string() == "secreto"
            })
            .returning(move |_, _| Ok(user_id));
        mocks
            .auth
            .expect_create_token()
            .returning(|event| Ok(AccessToken(event.access_token)));
        mocks.registry.expect_auth_token_ttl().return_const(86400u64);

        let (status, body) = send(
            mocks.into_registry(),
            request(
                Method::POST,
                "/api/auth",
                None,
                Some(json!({
                    "action": "signIn",
                    "email": " Docente@Colegio.edu ",
                    "password": "secreto"
                })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], user_id.to_string());
        assert_eq!(body["expiresIn"], 86400);
        assert!(!body["accessToken"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn stale_token_does_not_block_sign_in() {
        let docente = user_with_role(Role::Docente);
        let user_id = docente.id;
        let mut mocks = Mocks::anonymous();
        mocks
            .auth
            .expect_fetch_user_id_from_token()
            .returning(|_| Ok(None));
        mocks
            .auth
            .expect_verify_user()
            .returning(move |_, _| Ok(user_id));
        mocks
            .auth
            .expect_create_token()
            .returning(|event| Ok(AccessToken(event.access_token)));
        mocks.registry.expect_auth_token_ttl().return_const(3600u64);

        let (status, body) = send(
            mocks.into_registry(),
            request(
                Method::POST,
                "/api/auth",
                Some("token-vencido"),
                Some(json!({
                    "action": "signIn",
                    "email": "docente@colegio.edu",
                    "password": "secreto"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], user_id.to_string());
    }

    #[tokio::test]
    async fn wrong_credentials_are_401() {
        let mut mocks = Mocks::anonymous();
        mocks
            .auth
            .expect_verify_user()
            .returning(|_, _| Err(AppError::UnauthenticatedError));

        let (status, _) = send(
            mocks.into_registry(),
            request(
                Method::POST,
                "/api/auth",
                None,
                Some(json!({ "action": "signIn", "email": "a@b.co", "password": "incorrecta" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_sign_in_is_a_bad_request() {
        let (status, _) = send(
            Mocks::anonymous().into_registry(),
            request(
                Method::POST,
                "/api/auth",
                None,
                Some(json!({ "action": "signIn", "email": "no-es-un-email", "password": "secreto" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            Mocks::anonymous().into_registry(),
            request(
                Method::POST,
                "/api/auth",
                None,
                Some(json!({ "action": "impersonate" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid action");
    }

    #[tokio::test]
    async fn sign_out_drops_the_callers_token() {
        let docente = user_with_role(Role::Docente);
        let mut mocks = Mocks::signed_in(&docente);
        mocks
            .auth
            .expect_delete_token()
            .withf(|token| token.as_str() == TOKEN)
            .times(1)
            .returning(|_| Ok(()));

        let (status, body) = send(
            mocks.into_registry(),
            request(
                Method::POST,
                "/api/auth",
                Some(TOKEN),
                Some(json!({ "action": "signOut" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn session_queries_need_a_token() {
        let docente = user_with_role(Role::Docente);

        let (status, _) = send(
            Mocks::signed_in(&docente).into_registry(),
            request(Method::GET, "/api/auth?action=getCurrentUser", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            Mocks::signed_in(&docente).into_registry(),
            request(Method::GET, "/api/auth?action=getSession", Some(TOKEN), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accessToken"], TOKEN);
        assert_eq!(body["user"]["role"], "Docente");
    }
}
