use kernel::model::{
    grade::{
        event::{CreateSection, UpdateGrade, UpdateSection},
        Grade, Section,
    },
    id::{GradeId, SectionId},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::VariantNames;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: SectionId,
    pub grade_id: GradeId,
    pub name: String,
    pub alias: Option<String>,
}

impl From<Section> for SectionResponse {
    fn from(value: Section) -> Self {
        let Section {
            id,
            grade_id,
            name,
            alias,
        } = value;
        Self {
            id,
            grade_id,
            name,
            alias,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    pub id: GradeId,
    pub name: String,
    pub sections: Vec<SectionResponse>,
}

impl From<Grade> for GradeResponse {
    fn from(value: Grade) -> Self {
        let Grade { id, name, sections } = value;
        Self {
            id,
            name,
            sections: sections.into_iter().map(SectionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GradeOrSectionResponse {
    Grade(GradeResponse),
    Section(SectionResponse),
}

#[derive(Debug, Deserialize, VariantNames)]
#[serde(tag = "action", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum GradeAction {
    AddGrade(AddGradeRequest),
    AddSection(AddSectionRequest),
}

#[derive(Debug, Deserialize)]
pub struct AddGradeRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSectionRequest {
    pub grade_id: GradeId,
    pub name: String,
}

impl From<AddSectionRequest> for CreateSection {
    fn from(value: AddSectionRequest) -> Self {
        let AddSectionRequest { grade_id, name } = value;
        Self {
            grade_id,
            name: name.trim().to_string(),
        }
    }
}

/// What a `PUT /api/grades` body targets.
pub enum GradeUpdate {
    Grade(UpdateGrade),
    Section(UpdateSection),
}

#[derive(Debug, Deserialize)]
pub struct UpdateGradeRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl TryFrom<UpdateGradeRequest> for GradeUpdate {
    type Error = AppError;

    fn try_from(value: UpdateGradeRequest) -> AppResult<Self> {
        let UpdateGradeRequest {
            kind,
            id,
            name,
            alias,
        } = value;
        let name = name.trim().to_string();
        match kind.as_str() {
            "grade" => Ok(GradeUpdate::Grade(UpdateGrade {
                grade_id: id.into(),
                name,
            })),
            "section" => Ok(GradeUpdate::Section(UpdateSection {
                section_id: id.into(),
                name: Some(name),
                alias,
            })),
            other => Err(AppError::BadRequest(format!("Tipo desconocido: {other}"))),
        }
    }
}

/// What a `DELETE /api/grades` query targets.
#[derive(Debug, PartialEq, Eq)]
pub enum GradeDeletion {
    Grade(GradeId),
    Section(SectionId),
}

#[derive(Debug, Deserialize)]
pub struct DeleteGradeQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<Uuid>,
}

impl TryFrom<DeleteGradeQuery> for GradeDeletion {
    type Error = AppError;

    fn try_from(value: DeleteGradeQuery) -> AppResult<Self> {
        match (value.kind.as_deref(), value.id) {
            (Some("grade"), Some(id)) => Ok(GradeDeletion::Grade(id.into())),
            (Some("section"), Some(id)) => Ok(GradeDeletion::Section(id.into())),
            _ => Err(AppError::BadRequest(
                "Se requieren los parámetros 'type' e 'id'".into(),
            )),
        }
    }
}
