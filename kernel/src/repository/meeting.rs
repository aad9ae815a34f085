use crate::model::meeting::{
    event::{CreateMeeting, ToggleTaskStatus},
    Meeting,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Meeting>>;
    async fn create(&self, event: CreateMeeting) -> AppResult<Meeting>;
    async fn toggle_task_status(&self, event: ToggleTaskStatus) -> AppResult<Meeting>;
}
