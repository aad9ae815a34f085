use crate::model::resource::{
    event::{CreateResources, DeleteResource, UpdateResource, UpdateResourceStatus},
    Resource,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Resource>>;
    async fn create(&self, event: CreateResources) -> AppResult<Vec<Resource>>;
    async fn update(&self, event: UpdateResource) -> AppResult<Resource>;
    async fn update_status(&self, event: UpdateResourceStatus) -> AppResult<Resource>;
    async fn delete(&self, event: DeleteResource) -> AppResult<()>;
}
