use crate::model::id::{GradeId, SectionId};

#[derive(Debug)]
pub struct CreateSection {
    pub grade_id: GradeId,
    pub name: String,
}

#[derive(Debug)]
pub struct UpdateGrade {
    pub grade_id: GradeId,
    pub name: String,
}

#[derive(Debug)]
pub struct UpdateSection {
    pub section_id: SectionId,
    pub name: Option<String>,
    pub alias: Option<String>,
}
