use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts},
    Json, RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::AccessToken, id::UserId, role::Role, user::User};
use registry::AppRegistry;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult};
use strum::VariantNames;

/// The caller behind a valid `Authorization: Bearer` token.
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation)
        }
    }

    /// Admins act on anyone; everyone else only on themselves.
    pub fn require_self_or_admin(&self, user_id: UserId) -> AppResult<()> {
        if self.is_admin() || self.id() == user_id {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        let user_id = registry
            .auth_repository()
            .fetch_user_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        let user = registry
            .user_repository()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        Ok(Self { access_token, user })
    }
}

/// The caller, or `None` when no `Authorization` header is sent. A header that
/// does not resolve to a user is still rejected, and so are store failures.
pub struct MaybeAuthorizedUser(pub Option<AuthorizedUser>);

#[async_trait]
impl FromRequestParts<AppRegistry> for MaybeAuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(Self(None));
        }
        AuthorizedUser::from_request_parts(parts, registry)
            .await
            .map(|user| Self(Some(user)))
    }
}

/// JSON body whose rejections are reported as `400 {"error": ...}`.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Body of the action-dispatch routes: `{ "action": "<name>", ... }`.
///
/// An action outside `T::VARIANTS` (or no action at all) is rejected with
/// `InvalidAction` before the payload of the variant is looked at.
pub struct ActionJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ActionJson<T>
where
    T: DeserializeOwned + VariantNames,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(value) = AppJson::<serde_json::Value>::from_request(req, state).await?;

        let action = value.get("action").and_then(serde_json::Value::as_str);
        if !action.is_some_and(|action| T::VARIANTS.contains(&action)) {
            return Err(AppError::InvalidAction);
        }

        serde_json::from_value(value)
            .map(Self)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// Query string whose rejections are reported as `400 {"error": ...}`.
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}
