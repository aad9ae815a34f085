use crate::handler::resource::{delete_resource, list_resources, resource_action, update_resource};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_resource_routers() -> Router<AppRegistry> {
    Router::new().route(
        "/resources",
        get(list_resources)
            .post(resource_action)
            .put(update_resource)
            .delete(delete_resource),
    )
}
