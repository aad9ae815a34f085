use crate::model::category::Category;
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Category>>;
    async fn create_many(&self, names: Vec<String>) -> AppResult<Vec<Category>>;
    /// Removes the category together with every resource filed under it.
    async fn delete_by_name(&self, name: String) -> AppResult<()>;
}
