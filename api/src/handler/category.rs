use crate::{
    extractor::{AppJson, AppQuery, AuthorizedUser},
    model::{
        category::{AddCategoriesRequest, CategoryResponse, DeleteCategoryQuery},
        clean_names, SuccessResponse,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn list_categories(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    fetch_categories(&registry).await.map(Json)
}

pub async fn add_categories(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<AddCategoriesRequest>,
) -> AppResult<(StatusCode, Json<Vec<CategoryResponse>>)> {
    user.require_admin()?;
    create_categories(&registry, req)
        .await
        .map(|created| (StatusCode::CREATED, Json(created)))
}

pub async fn delete_category(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppQuery(query): AppQuery<DeleteCategoryQuery>,
) -> AppResult<Json<SuccessResponse>> {
    user.require_admin()?;
    remove_category(&registry, query.category_name).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub(crate) async fn fetch_categories(registry: &AppRegistry) -> AppResult<Vec<CategoryResponse>> {
    registry
        .category_repository()
        .find_all()
        .await
        .map(|categories| categories.into_iter().map(CategoryResponse::from).collect())
}

pub(crate) async fn create_categories(
    registry: &AppRegistry,
    req: AddCategoriesRequest,
) -> AppResult<Vec<CategoryResponse>> {
    let names = clean_names(req.category_names)?;
    registry
        .category_repository()
        .create_many(names)
        .await
        .map(|categories| categories.into_iter().map(CategoryResponse::from).collect())
}

pub(crate) async fn remove_category(registry: &AppRegistry, name: String) -> AppResult<()> {
    registry
        .category_repository()
        .delete_by_name(name.trim().to_string())
        .await
}
