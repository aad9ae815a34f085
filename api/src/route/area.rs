use crate::handler::area::{area_action, delete_area, list_areas, update_area};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_area_routers() -> Router<AppRegistry> {
    Router::new().route(
        "/areas",
        get(list_areas)
            .post(area_action)
            .put(update_area)
            .delete(delete_area),
    )
}
