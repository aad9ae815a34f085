use crate::{
    extractor::{ActionJson, AppJson, AppQuery, AuthorizedUser},
    model::{
        area::{AreaAction, AreaResponse, DeleteAreaQuery, UpdateAreaRequest},
        clean_name, clean_names, SuccessResponse,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use kernel::model::area::UpdateArea;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn list_areas(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<AreaResponse>>> {
    registry
        .area_repository()
        .find_all()
        .await
        .map(|areas| areas.into_iter().map(AreaResponse::from).collect())
        .map(Json)
}

pub async fn area_action(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    ActionJson(action): ActionJson<AreaAction>,
) -> AppResult<(StatusCode, Json<Vec<AreaResponse>>)> {
    user.require_admin()?;

    let AreaAction::AddMultiple(req) = action;
    let names = clean_names(req.names)?;
    registry
        .area_repository()
        .create_many(names)
        .await
        .map(|areas| {
            (
                StatusCode::CREATED,
                Json(areas.into_iter().map(AreaResponse::from).collect()),
            )
        })
}

pub async fn update_area(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateAreaRequest>,
) -> AppResult<Json<AreaResponse>> {
    user.require_admin()?;

    let UpdateArea { area_id, name } = req.into();
    registry
        .area_repository()
        .update(UpdateArea {
            area_id,
            name: clean_name(name)?,
        })
        .await
        .map(AreaResponse::from)
        .map(Json)
}

pub async fn delete_area(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppQuery(query): AppQuery<DeleteAreaQuery>,
) -> AppResult<Json<SuccessResponse>> {
    user.require_admin()?;

    registry.area_repository().delete(query.area_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
