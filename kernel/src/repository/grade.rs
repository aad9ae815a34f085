use crate::model::{
    grade::{
        event::{CreateSection, UpdateGrade, UpdateSection},
        Grade, Section,
    },
    id::{GradeId, SectionId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait GradeRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Grade>>;
    async fn create_grade(&self, name: String) -> AppResult<Grade>;
    async fn create_section(&self, event: CreateSection) -> AppResult<Section>;
    async fn update_grade(&self, event: UpdateGrade) -> AppResult<Grade>;
    async fn update_section(&self, event: UpdateSection) -> AppResult<Section>;
    /// Sections of the grade go with it.
    async fn delete_grade(&self, grade_id: GradeId) -> AppResult<()>;
    async fn delete_section(&self, section_id: SectionId) -> AppResult<()>;
}
