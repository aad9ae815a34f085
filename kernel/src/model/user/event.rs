use crate::model::{id::UserId, role::Role};

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
    pub dni: Option<String>,
    /// Users created without a password get a profile but cannot sign in.
    pub password: Option<String>,
}

#[derive(Debug, Default)]
pub struct UpdateUser {
    pub user_id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub dni: Option<String>,
}

#[derive(Debug)]
pub struct UpdateUserPassword {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug)]
pub struct DeleteUser {
    pub user_id: UserId,
}
