use crate::handler::reservation::{delete_reservation, list_reservations, reservation_action};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_reservation_routers() -> Router<AppRegistry> {
    Router::new().route(
        "/reservations",
        get(list_reservations)
            .post(reservation_action)
            .delete(delete_reservation),
    )
}
