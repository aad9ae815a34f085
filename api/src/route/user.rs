use crate::handler::user::{change_password, delete_user, list_users, update_user, user_action};
use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

pub fn build_user_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route(
            "/",
            get(list_users)
                .post(user_action)
                .put(update_user)
                .delete(delete_user),
        )
        .route("/me/password", put(change_password));

    Router::new().nest("/users", routers)
}
