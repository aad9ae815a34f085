use crate::{
    extractor::{ActionJson, AuthorizedUser},
    model::meeting::{MeetingAction, MeetingResponse},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use garde::Validate;
use kernel::model::meeting::event::CreateMeeting;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn list_meetings(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<MeetingResponse>>> {
    registry
        .meeting_repository()
        .find_all()
        .await
        .map(|meetings| meetings.into_iter().map(MeetingResponse::from).collect())
        .map(Json)
}

pub async fn meeting_action(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    ActionJson(action): ActionJson<MeetingAction>,
) -> AppResult<Response> {
    user.require_admin()?;

    match action {
        MeetingAction::Add(req) => {
            req.validate(&())?;
            let created = registry
                .meeting_repository()
                .create(CreateMeeting::try_from(req)?)
                .await?;
            Ok((StatusCode::CREATED, Json(MeetingResponse::from(created))).into_response())
        }
        MeetingAction::ToggleTaskStatus(req) => registry
            .meeting_repository()
            .toggle_task_status(req.into())
            .await
            .map(|meeting| Json(MeetingResponse::from(meeting)).into_response()),
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{request, send, user_with_role, Mocks, TOKEN};
    use axum::http::{Method, StatusCode};
    use kernel::{
        model::role::Role,
        repository::meeting::{MeetingRepository, MockMeetingRepository},
    };
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn a_meeting_needs_an_organizer() {
        let admin = user_with_role(Role::Admin);
        let mut repo = MockMeetingRepository::new();
        repo.expect_create().never();
        let repo: Arc<dyn MeetingRepository> = Arc::new(repo);
        let mut mocks = Mocks::signed_in(&admin);
        mocks
            .registry
            .expect_meeting_repository()
            .returning(move || repo.clone());

        let (status, body) = send(
            mocks.into_registry(),
            request(
                Method::POST,
                "/api/meetings",
                Some(TOKEN),
                Some(json!({ "action": "add", "title": "Consejo académico" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some());
    }
}
