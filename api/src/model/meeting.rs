use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{MeetingId, UserId},
    meeting::{
        event::{CreateMeeting, ToggleTaskStatus},
        AgreementTask, GenericParticipant, Meeting, TaskStatus,
    },
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::VariantNames;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingResponse {
    pub id: MeetingId,
    pub title: String,
    pub organizer_id: UserId,
    pub date: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub participants: Vec<UserId>,
    pub generic_participants: Vec<GenericParticipant>,
    pub colegiado_areas: Vec<String>,
    pub other_participants: String,
    pub tasks: Vec<AgreementTask>,
}

impl From<Meeting> for MeetingResponse {
    fn from(value: Meeting) -> Self {
        let Meeting {
            id,
            title,
            organizer_id,
            date,
            end_time,
            status,
            participants,
            generic_participants,
            colegiado_areas,
            other_participants,
            tasks,
        } = value;
        Self {
            id,
            title,
            organizer_id,
            date,
            end_time,
            status,
            participants,
            generic_participants,
            colegiado_areas,
            other_participants,
            tasks,
        }
    }
}

#[derive(Debug, Deserialize, VariantNames)]
#[serde(tag = "action", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum MeetingAction {
    Add(CreateMeetingRequest),
    ToggleTaskStatus(ToggleTaskStatusRequest),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub description: String,
    #[serde(default)]
    pub responsible_id: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<TaskRequest> for AgreementTask {
    fn from(value: TaskRequest) -> Self {
        let TaskRequest {
            id,
            description,
            responsible_id,
            status,
            notes,
        } = value;
        Self {
            id: id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            description,
            responsible_id,
            status,
            notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingRequest {
    #[garde(required)]
    #[serde(default)]
    pub organizer_id: Option<UserId>,
    #[garde(pattern(r"\S"))]
    #[serde(default)]
    pub title: String,
    #[garde(skip)]
    #[serde(default)]
    pub participants: Vec<UserId>,
    #[garde(skip)]
    #[serde(default)]
    pub generic_participants: Vec<GenericParticipant>,
    #[garde(skip)]
    #[serde(default)]
    pub colegiado_areas: Vec<String>,
    #[garde(skip)]
    #[serde(default)]
    pub other_participants: String,
    #[garde(skip)]
    #[serde(default)]
    pub tasks: Vec<TaskRequest>,
}

impl TryFrom<CreateMeetingRequest> for CreateMeeting {
    type Error = AppError;

    fn try_from(value: CreateMeetingRequest) -> AppResult<Self> {
        let CreateMeetingRequest {
            organizer_id,
            title,
            participants,
            generic_participants,
            colegiado_areas,
            other_participants,
            tasks,
        } = value;
        let organizer_id = organizer_id
            .ok_or_else(|| AppError::BadRequest("Se requiere el ID del organizador".into()))?;
        Ok(Self {
            title,
            organizer_id,
            participants,
            generic_participants,
            colegiado_areas,
            other_participants,
            tasks: tasks.into_iter().map(AgreementTask::from).collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTaskStatusRequest {
    pub meeting_id: MeetingId,
    pub task_id: String,
}

impl From<ToggleTaskStatusRequest> for ToggleTaskStatus {
    fn from(value: ToggleTaskStatusRequest) -> Self {
        let ToggleTaskStatusRequest {
            meeting_id,
            task_id,
        } = value;
        Self {
            meeting_id,
            task_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_without_id_get_one() {
        let req: CreateMeetingRequest = serde_json::from_value(serde_json::json!({
            "organizerId": UserId::new(),
            "title": "Jornada pedagógica",
            "genericParticipants": ["docentes", "director"],
            "tasks": [
                { "description": "Enviar acta", "responsibleId": "u-1" },
                { "id": "t-9", "description": "Reservar aula", "responsibleId": "u-2", "status": "completed" }
            ]
        }))
        .unwrap();
        let event = CreateMeeting::try_from(req).unwrap();

        assert_eq!(event.tasks.len(), 2);
        assert!(!event.tasks[0].id.is_empty());
        assert_eq!(event.tasks[0].status, TaskStatus::Pending);
        assert_eq!(event.tasks[1].id, "t-9");
        assert_eq!(event.tasks[1].status, TaskStatus::Completed);
        assert_eq!(
            event.generic_participants,
            vec![GenericParticipant::Docentes, GenericParticipant::Director]
        );
    }

    #[test]
    fn organizer_and_title_are_required() {
        let without_organizer: CreateMeetingRequest =
            serde_json::from_value(serde_json::json!({ "title": "Consejo" })).unwrap();
        assert!(without_organizer.validate(&()).is_err());
        assert!(matches!(
            CreateMeeting::try_from(without_organizer),
            Err(AppError::BadRequest(_))
        ));

        let blank_title: CreateMeetingRequest = serde_json::from_value(serde_json::json!({
            "organizerId": UserId::new(),
            "title": "   "
        }))
        .unwrap();
        assert!(blank_title.validate(&()).is_err());

        let complete: CreateMeetingRequest = serde_json::from_value(serde_json::json!({
            "organizerId": UserId::new(),
            "title": "Consejo"
        }))
        .unwrap();
        assert!(complete.validate(&()).is_ok());
    }
}
