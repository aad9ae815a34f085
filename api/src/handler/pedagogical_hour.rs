use crate::{
    extractor::{ActionJson, AppJson, AppQuery, AuthorizedUser},
    model::{
        clean_name,
        pedagogical_hour::{
            DeletePedagogicalHourQuery, PedagogicalHourAction, PedagogicalHourResponse,
            UpdatePedagogicalHourRequest,
        },
        SuccessResponse,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use kernel::model::pedagogical_hour::UpdatePedagogicalHour;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn list_pedagogical_hours(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<PedagogicalHourResponse>>> {
    registry
        .pedagogical_hour_repository()
        .find_all()
        .await
        .map(|hours| hours.into_iter().map(PedagogicalHourResponse::from).collect())
        .map(Json)
}

pub async fn pedagogical_hour_action(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    ActionJson(action): ActionJson<PedagogicalHourAction>,
) -> AppResult<(StatusCode, Json<PedagogicalHourResponse>)> {
    user.require_admin()?;

    let PedagogicalHourAction::Add(req) = action;
    registry
        .pedagogical_hour_repository()
        .create(clean_name(req.name)?)
        .await
        .map(|hour| (StatusCode::CREATED, Json(hour.into())))
}

pub async fn update_pedagogical_hour(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdatePedagogicalHourRequest>,
) -> AppResult<Json<PedagogicalHourResponse>> {
    user.require_admin()?;

    let UpdatePedagogicalHour {
        pedagogical_hour_id,
        name,
    } = req.into();
    registry
        .pedagogical_hour_repository()
        .update(UpdatePedagogicalHour {
            pedagogical_hour_id,
            name: clean_name(name)?,
        })
        .await
        .map(PedagogicalHourResponse::from)
        .map(Json)
}

pub async fn delete_pedagogical_hour(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppQuery(query): AppQuery<DeletePedagogicalHourQuery>,
) -> AppResult<Json<SuccessResponse>> {
    user.require_admin()?;

    registry
        .pedagogical_hour_repository()
        .delete(query.pedagogical_hour_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
