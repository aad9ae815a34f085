use crate::handler::grade::{delete_grade, grade_action, list_grades, update_grade};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_grade_routers() -> Router<AppRegistry> {
    Router::new().route(
        "/grades",
        get(list_grades)
            .post(grade_action)
            .put(update_grade)
            .delete(delete_grade),
    )
}
