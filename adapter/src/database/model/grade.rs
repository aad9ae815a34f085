use kernel::model::{
    grade::Section,
    id::{GradeId, SectionId},
};

#[derive(sqlx::FromRow)]
pub struct GradeRow {
    pub grade_id: GradeId,
    pub name: String,
}

impl From<GradeRow> for (GradeId, String) {
    fn from(value: GradeRow) -> Self {
        (value.grade_id, value.name)
    }
}

#[derive(sqlx::FromRow)]
pub struct SectionRow {
    pub section_id: SectionId,
    pub grade_id: GradeId,
    pub name: String,
    pub alias: Option<String>,
}

impl From<SectionRow> for Section {
    fn from(value: SectionRow) -> Self {
        let SectionRow {
            section_id,
            grade_id,
            name,
            alias,
        } = value;
        Section {
            id: section_id,
            grade_id,
            name,
            alias,
        }
    }
}
