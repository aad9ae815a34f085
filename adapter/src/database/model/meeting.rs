use super::parse_stored;
use chrono::{DateTime, Utc};
use kernel::model::{
    id::{MeetingId, UserId},
    meeting::{AgreementTask, Meeting},
};
use shared::error::AppError;
use sqlx::types::Json;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct MeetingRow {
    pub meeting_id: MeetingId,
    pub title: String,
    pub organizer_id: UserId,
    pub date: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub participants: Vec<Uuid>,
    pub generic_participants: Vec<String>,
    pub colegiado_areas: Vec<String>,
    pub other_participants: String,
    pub tasks: Json<Vec<AgreementTask>>,
}

impl TryFrom<MeetingRow> for Meeting {
    type Error = AppError;

    fn try_from(value: MeetingRow) -> Result<Self, Self::Error> {
        let MeetingRow {
            meeting_id,
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
        Ok(Meeting {
            id: meeting_id,
            title,
            organizer_id,
            date,
            end_time,
            status,
            participants: participants.into_iter().map(UserId::from).collect(),
            generic_participants: generic_participants
                .iter()
                .map(|p| parse_stored(p))
                .collect::<Result<_, _>>()?,
            colegiado_areas,
            other_participants,
            tasks: tasks.0,
        })
    }
}
