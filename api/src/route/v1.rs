use super::{
    area::build_area_routers, auth::build_auth_routers, category::build_category_routers,
    grade::build_grade_routers, health::build_health_check_routers, loan::build_loan_routers,
    meeting::build_meeting_routers, pedagogical_hour::build_pedagogical_hour_routers,
    reservation::build_reservation_routers, resource::build_resource_routers,
    settings::build_settings_routers, user::build_user_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_user_routers())
        .merge(build_category_routers())
        .merge(build_resource_routers())
        .merge(build_loan_routers())
        .merge(build_reservation_routers())
        .merge(build_meeting_routers())
        .merge(build_area_routers())
        .merge(build_grade_routers())
        .merge(build_pedagogical_hour_routers())
        .merge(build_settings_routers());
    Router::new().nest("/api", router)
}
