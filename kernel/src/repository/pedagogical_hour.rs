use crate::model::{
    id::PedagogicalHourId,
    pedagogical_hour::{PedagogicalHour, UpdatePedagogicalHour},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait PedagogicalHourRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<PedagogicalHour>>;
    async fn create(&self, name: String) -> AppResult<PedagogicalHour>;
    async fn update(&self, event: UpdatePedagogicalHour) -> AppResult<PedagogicalHour>;
    async fn delete(&self, pedagogical_hour_id: PedagogicalHourId) -> AppResult<()>;
}
