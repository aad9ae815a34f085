use crate::database::{model::meeting::MeetingRow, ConnectionPool};
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::{
    model::{
        id::MeetingId,
        meeting::{
            default_end_time,
            event::{CreateMeeting, ToggleTaskStatus},
            Meeting, SCHEDULED,
        },
    },
    repository::meeting::MeetingRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::types::Json;
use uuid::Uuid;

const MEETING_COLUMNS: &str = r#"
    meeting_id, title, organizer_id, date, end_time, status, participants,
    generic_participants, colegiado_areas, other_participants, tasks
"#;

#[derive(new)]
pub struct MeetingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl MeetingRepository for MeetingRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Meeting>> {
        sqlx::query_as::<_, MeetingRow>(&format!(
            "SELECT {MEETING_COLUMNS} FROM meetings ORDER BY date DESC"
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Meeting::try_from)
        .collect()
    }

    async fn create(&self, event: CreateMeeting) -> AppResult<Meeting> {
        let mut tx = self.db.begin().await?;

        let organizer_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
                .bind(event.organizer_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if !organizer_exists {
            return Err(AppError::EntityNotFound(format!(
                "Organizador ({}) no encontrado",
                event.organizer_id
            )));
        }

        let date = Utc::now();
        let participants: Vec<Uuid> = event.participants.iter().map(|id| id.raw()).collect();
        let generic: Vec<String> = event
            .generic_participants
            .iter()
            .map(|p| p.to_string())
            .collect();

        let row = sqlx::query_as::<_, MeetingRow>(&format!(
            r#"
                INSERT INTO meetings (
                    meeting_id, title, organizer_id, date, end_time, status, participants,
                    generic_participants, colegiado_areas, other_participants, tasks
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING {MEETING_COLUMNS}
            "#
        ))
        .bind(MeetingId::new())
        .bind(event.title.trim())
        .bind(event.organizer_id)
        .bind(date)
        .bind(default_end_time(date))
        .bind(SCHEDULED)
        .bind(participants)
        .bind(generic)
        .bind(&event.colegiado_areas)
        .bind(&event.other_participants)
        .bind(Json(&event.tasks))
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Meeting::try_from(row)
    }

    async fn toggle_task_status(&self, event: ToggleTaskStatus) -> AppResult<Meeting> {
        let mut tx = self.db.begin().await?;

        let mut meeting: Meeting = sqlx::query_as::<_, MeetingRow>(&format!(
            "SELECT {MEETING_COLUMNS} FROM meetings WHERE meeting_id = $1 FOR UPDATE"
        ))
        .bind(event.meeting_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("Reunión ({}) no encontrada", event.meeting_id))
        })?
        .try_into()?;

        meeting.toggle_task(&event.task_id)?;

        sqlx::query("UPDATE meetings SET tasks = $2 WHERE meeting_id = $1")
            .bind(event.meeting_id)
            .bind(Json(&meeting.tasks))
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(meeting)
    }
}
