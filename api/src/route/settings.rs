use crate::handler::settings::{show_settings, update_settings};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_settings_routers() -> Router<AppRegistry> {
    Router::new().route("/settings", get(show_settings).put(update_settings))
}
