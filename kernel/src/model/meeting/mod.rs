use crate::model::id::{MeetingId, UserId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

/// Status given to every meeting when it is recorded.
pub const SCHEDULED: &str = "scheduled";

const DEFAULT_DURATION_MINUTES: i64 = 60;

/// End time of a meeting created from the agenda form.
pub fn default_end_time(date: DateTime<Utc>) -> DateTime<Utc> {
    date + Duration::minutes(DEFAULT_DURATION_MINUTES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GenericParticipant {
    Director,
    Subdirector,
    Coordinadores,
    Docentes,
    Otros,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

/// A follow-up agreed during a meeting, stored inline with the meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementTask {
    pub id: String,
    pub description: String,
    pub responsible_id: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
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

impl Meeting {
    pub fn toggle_task(&mut self, task_id: &str) -> AppResult<&AgreementTask> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("La tarea ({task_id}) no existe en la reunión"))
            })?;
        task.status = task.status.toggled();
        Ok(task)
    }
}
