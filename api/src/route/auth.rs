use crate::handler::auth::{auth_action, show_session};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_auth_routers() -> Router<AppRegistry> {
    Router::new().route("/auth", get(show_session).post(auth_action))
}
