use super::parse_stored;
use chrono::{DateTime, Utc};
use kernel::model::{
    id::UserId,
    user::{User, UserSummary},
};
use shared::error::{AppError, AppResult};

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub role: String,
    pub dni: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            name,
            email,
            role,
            dni,
            created_at,
        } = value;
        Ok(User {
            id: user_id,
            name,
            email,
            role: parse_stored(&role)?,
            dni,
            created_at,
        })
    }
}

/// User columns pulled in through a LEFT JOIN; all empty when the user is gone.
pub struct JoinedUser {
    pub user_id: UserId,
    pub name: Option<String>,
    pub role: Option<String>,
    pub dni: Option<String>,
    pub email: Option<String>,
}

impl JoinedUser {
    pub fn into_summary(self) -> AppResult<UserSummary> {
        let JoinedUser {
            user_id,
            name,
            role,
            dni,
            email,
        } = self;
        match (name, role) {
            (Some(name), Some(role)) => Ok(UserSummary {
                id: user_id,
                name,
                role: parse_stored(&role)?,
                dni,
                email,
            }),
            _ => Ok(UserSummary::unknown(user_id)),
        }
    }
}
