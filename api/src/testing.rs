use crate::route::v1::routes;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use chrono::Utc;
use http_body_util::BodyExt;
use kernel::{
    model::{id::UserId, role::Role, user::User},
    repository::{
        auth::{AuthRepository, MockAuthRepository},
        user::{MockUserRepository, UserRepository},
    },
};
use registry::{AppRegistry, MockAppRegistryExt};
use std::sync::Arc;
use tower::ServiceExt;

pub(crate) const TOKEN: &str = "0f3c9a7e2b6d4e1f8a5c7b9d2e4f6a8c";

pub(crate) fn user_with_role(role: Role) -> User {
    User {
        id: UserId::new(),
        name: format!("{role} de prueba"),
        email: Some(format!("{}@colegio.edu", role.as_ref().to_lowercase())),
        role,
        dni: Some("44556677".into()),
        created_at: Utc::now(),
    }
}

/// Mocks shared by the handler tests. The auth and user repositories are
/// kept apart so a test can add expectations before they are frozen in `Arc`s.
pub(crate) struct Mocks {
    pub registry: MockAppRegistryExt,
    pub auth: MockAuthRepository,
    pub users: MockUserRepository,
}

impl Mocks {
    pub(crate) fn anonymous() -> Self {
        Self {
            registry: MockAppRegistryExt::new(),
            auth: MockAuthRepository::new(),
            users: MockUserRepository::new(),
        }
    }

    /// `TOKEN` resolves to `caller`.
    pub(crate) fn signed_in(caller: &User) -> Self {
        let mut mocks = Self::anonymous();
        let caller_id = caller.id;
        mocks
            .auth
            .expect_fetch_user_id_from_token()
            .returning(move |token| Ok((token.as_str() == TOKEN).then_some(caller_id)));
        let caller = caller.clone();
        mocks
            .users
            .expect_find_by_id()
            .returning(move |id| Ok((id == caller.id).then(|| caller.clone())));
        mocks
    }

    pub(crate) fn into_registry(self) -> AppRegistry {
        let Self {
            mut registry,
            auth,
            users,
        } = self;
        let auth: Arc<dyn AuthRepository> = Arc::new(auth);
        let users: Arc<dyn UserRepository> = Arc::new(users);
        registry
            .expect_auth_repository()
            .returning(move || auth.clone());
        registry
            .expect_user_repository()
            .returning(move || users.clone());
        Arc::new(registry)
    }
}

pub(crate) fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Runs `req` through the full router and returns the status and JSON body
/// (`Null` when the body is empty).
pub(crate) async fn send(
    registry: AppRegistry,
    req: Request<Body>,
) -> (StatusCode, serde_json::Value) {
    let res = routes().with_state(registry).oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
