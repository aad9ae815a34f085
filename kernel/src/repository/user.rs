use crate::model::{
    id::UserId,
    list::ListOptions,
    user::{
        event::{CreateUser, DeleteUser, UpdateUser, UpdateUserPassword},
        User,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Newest first.
    async fn find_all(&self, options: ListOptions) -> AppResult<Vec<User>>;
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn update(&self, event: UpdateUser) -> AppResult<User>;
    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()>;
    async fn delete(&self, event: DeleteUser) -> AppResult<()>;
}
