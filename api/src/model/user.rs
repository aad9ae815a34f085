use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    list::ListOptions,
    role::Role,
    user::{
        event::{CreateUser, UpdateUser, UpdateUserPassword},
        User, UserSummary,
    },
};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleName {
    Admin,
    Docente,
    Auxiliar,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::Docente => Self::Docente,
            Role::Auxiliar => Self::Auxiliar,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Admin => Self::Admin,
            RoleName::Docente => Self::Docente,
            RoleName::Auxiliar => Self::Auxiliar,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserListQuery {
    #[garde(range(min = 0))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    ListOptions::DEFAULT_LIMIT
}

impl From<UserListQuery> for ListOptions {
    fn from(value: UserListQuery) -> Self {
        let UserListQuery { limit, offset } = value;
        ListOptions::new(limit, offset)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub role: RoleName,
    pub dni: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            role,
            dni,
            created_at,
        } = value;
        Self {
            id,
            name,
            email,
            role: RoleName::from(role),
            dni,
            created_at,
        }
    }
}

/// Borrower or booker embedded in loans and reservations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    pub id: UserId,
    pub name: String,
    pub role: RoleName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(value: UserSummary) -> Self {
        let UserSummary {
            id,
            name,
            role,
            dni,
            email,
        } = value;
        Self {
            id,
            name,
            role: role.into(),
            dni,
            email,
        }
    }
}

#[derive(Debug, Deserialize, VariantNames)]
#[serde(tag = "action", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum UserAction {
    Add(CreateUserRequest),
    AddMultiple(AddMultipleUsersRequest),
    Register(RegisterUserRequest),
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"))]
    #[serde(default)]
    pub email: Option<String>,
    #[garde(skip)]
    pub role: RoleName,
    #[garde(skip)]
    #[serde(default)]
    pub dni: Option<String>,
    #[garde(length(min = 6))]
    #[serde(default)]
    pub password: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            name,
            email,
            role,
            dni,
            password,
        } = value;
        Self {
            name,
            email,
            role: role.into(),
            dni: dni.filter(|d| !d.trim().is_empty()),
            password,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddMultipleUsersRequest {
    #[garde(length(min = 1))]
    pub users: Vec<CreateUserRequest>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"))]
    pub email: String,
    #[garde(length(min = 6))]
    pub password: String,
    #[garde(length(min = 1))]
    pub dni: String,
    #[garde(skip)]
    #[serde(default)]
    pub role: Option<RoleName>,
}

/// Registration with the role already decided by who is registering.
#[derive(new)]
pub struct RegisterUserRequestWithRole(RegisterUserRequest, Role);

impl From<RegisterUserRequestWithRole> for CreateUser {
    fn from(value: RegisterUserRequestWithRole) -> Self {
        let RegisterUserRequestWithRole(
            RegisterUserRequest {
                name,
                email,
                password,
                dni,
                role: _,
            },
            role,
        ) = value;
        Self {
            name,
            email: Some(email),
            role,
            dni: Some(dni),
            password: Some(password),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[garde(skip)]
    pub user_id: UserId,
    #[garde(length(min = 1))]
    #[serde(default)]
    pub name: Option<String>,
    #[garde(pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"))]
    #[serde(default)]
    pub email: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    pub role: Option<RoleName>,
    #[garde(skip)]
    #[serde(default)]
    pub dni: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(value: UpdateUserRequest) -> Self {
        let UpdateUserRequest {
            user_id,
            name,
            email,
            role,
            dni,
        } = value;
        Self {
            user_id,
            name,
            email,
            role: role.map(Role::from),
            dni,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserQuery {
    pub user_id: UserId,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPasswordRequest {
    #[garde(length(min = 1))]
    current_password: String,
    #[garde(length(min = 6))]
    new_password: String,
}

#[derive(new)]
pub struct UpdateUserPasswordRequestWithUserId(UserId, UpdateUserPasswordRequest);

impl From<UpdateUserPasswordRequestWithUserId> for UpdateUserPassword {
    fn from(value: UpdateUserPasswordRequestWithUserId) -> Self {
        let UpdateUserPasswordRequestWithUserId(
            user_id,
            UpdateUserPasswordRequest {
                current_password,
                new_password,
            },
        ) = value;
        UpdateUserPassword {
            user_id,
            current_password,
            new_password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_needs_email_password_and_dni() {
        let res = serde_json::from_value::<UserAction>(serde_json::json!({
            "action": "register",
            "name": "Carla",
            "email": "carla@colegio.edu"
        }));
        assert!(res.is_err());

        let action = serde_json::from_value::<UserAction>(serde_json::json!({
            "action": "register",
            "name": "Carla",
            "email": "carla@colegio.edu",
            "password": "secreto",
            "dni": "70707070"
        }))
        .unwrap();
        let UserAction::Register(req) = action else {
            panic!("expected a registration");
        };
        assert!(req.validate(&()).is_ok());
    }

    #[test]
    fn short_passwords_are_rejected() {
        let req: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Carla",
            "role": "Docente",
            "password": "123"
        }))
        .unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn optional_email_is_checked_only_when_present() {
        let with_email = |email: serde_json::Value| {
            serde_json::from_value::<CreateUserRequest>(serde_json::json!({
                "name": "Carla",
                "role": "Docente",
                "email": email
            }))
            .unwrap()
        };
        assert!(with_email(serde_json::Value::Null).validate(&()).is_ok());
        assert!(with_email("carla@colegio.edu".into()).validate(&()).is_ok());
        assert!(with_email("carla@colegio".into()).validate(&()).is_err());
    }

    #[test]
    fn blank_dni_is_dropped() {
        let req: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Carla",
            "role": "Auxiliar",
            "dni": "  "
        }))
        .unwrap();
        let event = CreateUser::from(req);
        assert_eq!(event.dni, None);
        assert_eq!(event.role, Role::Auxiliar);
    }
}
