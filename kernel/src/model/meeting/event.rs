use crate::model::{
    id::{MeetingId, UserId},
    meeting::{AgreementTask, GenericParticipant},
};

#[derive(Debug, Clone)]
pub struct CreateMeeting {
    pub title: String,
    pub organizer_id: UserId,
    pub participants: Vec<UserId>,
    pub generic_participants: Vec<GenericParticipant>,
    pub colegiado_areas: Vec<String>,
    pub other_participants: String,
    pub tasks: Vec<AgreementTask>,
}

#[derive(Debug)]
pub struct ToggleTaskStatus {
    pub meeting_id: MeetingId,
    pub task_id: String,
}
