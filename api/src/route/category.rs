use crate::handler::category::{add_categories, delete_category, list_categories};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_category_routers() -> Router<AppRegistry> {
    Router::new().route(
        "/categories",
        get(list_categories)
            .post(add_categories)
            .delete(delete_category),
    )
}
