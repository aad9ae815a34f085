use crate::handler::meeting::{list_meetings, meeting_action};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_meeting_routers() -> Router<AppRegistry> {
    Router::new().route("/meetings", get(list_meetings).post(meeting_action))
}
