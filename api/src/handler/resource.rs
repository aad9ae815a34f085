use super::category::{create_categories, fetch_categories, remove_category};
use crate::{
    extractor::{ActionJson, AppJson, AppQuery, AuthorizedUser},
    model::{
        resource::{DeleteResourceQuery, ResourceAction, ResourceResponse, UpdateResourceRequest},
        ActionQuery, SuccessResponse,
    },
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use garde::Validate;
use kernel::model::resource::event::DeleteResource;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn list_resources(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppQuery(query): AppQuery<ActionQuery>,
) -> AppResult<Response> {
    match query.action.as_deref() {
        None => registry
            .resource_repository()
            .find_all()
            .await
            .map(|resources| {
                let resources: Vec<ResourceResponse> =
                    resources.into_iter().map(ResourceResponse::from).collect();
                Json(resources).into_response()
            }),
        Some("getCategories") => fetch_categories(&registry)
            .await
            .map(|categories| Json(categories).into_response()),
        Some(_) => Err(AppError::InvalidAction),
    }
}

pub async fn resource_action(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    ActionJson(action): ActionJson<ResourceAction>,
) -> AppResult<Response> {
    user.require_admin()?;

    match action {
        ResourceAction::Add(req) => {
            req.validate(&())?;
            let created: Vec<ResourceResponse> = registry
                .resource_repository()
                .create(req.into())
                .await?
                .into_iter()
                .map(ResourceResponse::from)
                .collect();
            Ok((StatusCode::CREATED, Json(created)).into_response())
        }
        ResourceAction::UpdateStatus(req) => registry
            .resource_repository()
            .update_status(req.into())
            .await
            .map(|resource| Json(ResourceResponse::from(resource)).into_response()),
        ResourceAction::AddCategories(req) => create_categories(&registry, req)
            .await
            .map(|created| (StatusCode::CREATED, Json(created)).into_response()),
    }
}

pub async fn update_resource(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateResourceRequest>,
) -> AppResult<Json<ResourceResponse>> {
    user.require_admin()?;

    registry
        .resource_repository()
        .update(req.into())
        .await
        .map(ResourceResponse::from)
        .map(Json)
}

pub async fn delete_resource(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppQuery(query): AppQuery<DeleteResourceQuery>,
) -> AppResult<Json<SuccessResponse>> {
    user.require_admin()?;

    match query.action.as_deref() {
        Some("deleteCategory") => {
            let name = query.category_name.ok_or_else(|| {
                AppError::BadRequest("Se requiere el nombre de la categoría".into())
            })?;
            remove_category(&registry, name).await?;
        }
        None => {
            let resource_id = query.resource_id.ok_or_else(|| {
                AppError::BadRequest("Se requiere el ID del recurso".into())
            })?;
            registry
                .resource_repository()
                .delete(DeleteResource { resource_id })
                .await?;
        }
        Some(_) => return Err(AppError::InvalidAction),
    }
    Ok(Json(SuccessResponse::ok()))
}
