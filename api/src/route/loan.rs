use crate::handler::loan::{list_loans, loan_action, loan_summary, update_loan};
use axum::{routing::get, Router};
use registry::AppRegistry;

pub fn build_loan_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(list_loans).post(loan_action).put(update_loan))
        .route("/summary", get(loan_summary));

    Router::new().nest("/loans", routers)
}
