use crate::model::settings::{AppSettings, UpdateAppSettings};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn find(&self) -> AppResult<AppSettings>;
    async fn update(&self, event: UpdateAppSettings) -> AppResult<AppSettings>;
}
