use crate::model::{
    area::{Area, UpdateArea},
    id::AreaId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait AreaRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Area>>;
    async fn create_many(&self, names: Vec<String>) -> AppResult<Vec<Area>>;
    async fn update(&self, event: UpdateArea) -> AppResult<Area>;
    async fn delete(&self, area_id: AreaId) -> AppResult<()>;
}
