use crate::handler::pedagogical_hour::{
    delete_pedagogical_hour, list_pedagogical_hours, pedagogical_hour_action,
    update_pedagogical_hour,
};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_pedagogical_hour_routers() -> Router<AppRegistry> {
    Router::new().route(
        "/pedagogical-hours",
        get(list_pedagogical_hours)
            .post(pedagogical_hour_action)
            .put(update_pedagogical_hour)
            .delete(delete_pedagogical_hour),
    )
}
